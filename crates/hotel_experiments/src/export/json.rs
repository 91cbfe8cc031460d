use serde::Serialize;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;

#[derive(Serialize)]
struct ResultRow<'a> {
    experiment_id: &'a str,
    run_id: usize,
    seed: u64,
    days: u32,
    params: &'a hotel_core::scenario::HotelParams,
    result: &'a SimulationResult,
}

pub(crate) fn export_to_json_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}

/// Each result next to the parameters that produced it.
pub(crate) fn export_runs_to_json_impl(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<_> = results
        .iter()
        .zip(parameter_sets)
        .map(|(result, set)| ResultRow {
            experiment_id: &set.experiment_id,
            run_id: set.run_id,
            seed: set.seed,
            days: set.days,
            params: &set.params,
            result,
        })
        .collect();
    serde_json::to_writer_pretty(file, &rows)?;
    Ok(())
}
