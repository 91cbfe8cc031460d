use std::cmp::Ordering;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;
use crate::scoring::{calculate_scores, ScoreWeights};

pub(crate) fn find_best_index_by_score(
    results: &[SimulationResult],
    weights: &ScoreWeights,
) -> Option<usize> {
    calculate_scores(results, weights)
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(index, _)| index)
}

pub(crate) fn find_best_parameters_impl<'a>(
    results: &[SimulationResult],
    parameter_sets: &'a [ParameterSet],
    weights: &ScoreWeights,
) -> Option<&'a ParameterSet> {
    if results.len() != parameter_sets.len() {
        return None;
    }
    let best_idx = find_best_index_by_score(results, weights)?;
    parameter_sets.get(best_idx)
}
