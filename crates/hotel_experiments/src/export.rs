//! Result export and ranking.
//!
//! Results go to CSV (one row per run, parameters included) or JSON. Ranking
//! picks the best run by weighted [crate::scoring] score.

use std::path::Path;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;
use crate::scoring::ScoreWeights;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/ranking.rs"]
mod ranking;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Write `results` as a pretty-printed JSON array.
pub fn export_to_json(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Write each result together with its experiment id, seed and hotel
/// parameters as a JSON array.
///
/// `results[i]` must come from `parameter_sets[i]`.
pub fn export_runs_to_json(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_same_len(results, parameter_sets)?;
    let file = writer_utils::create_output_file(path)?;
    json::export_runs_to_json_impl(results, parameter_sets, file)
}

/// Export results with their parameters to CSV, one row per run.
///
/// # Errors
///
/// Fails when there is nothing to export, when the slices differ in length,
/// or on I/O and CSV errors.
pub fn export_to_csv(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    writer_utils::ensure_same_len(results, parameter_sets)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// The parameter set whose result scores highest. `None` if the inputs are
/// empty or mismatched.
pub fn find_best_parameters<'a>(
    results: &[SimulationResult],
    parameter_sets: &'a [ParameterSet],
    weights: &ScoreWeights,
) -> Option<&'a ParameterSet> {
    ranking::find_best_parameters_impl(results, parameter_sets, weights)
}

/// Index of the highest-scoring result, or `None` if `results` is empty.
pub fn find_best_result_index(
    results: &[SimulationResult],
    weights: &ScoreWeights,
) -> Option<usize> {
    ranking::find_best_index_by_score(results, weights)
}
