//! Parallel simulation execution using rayon.

use hotel_core::scenario::build_runner;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::metrics::{extract_metrics, SimulationResult};
use crate::parameters::ParameterSet;

/// Clock step used for every experiment run.
pub const STEP_HOURS: u32 = 1;

/// Run one parameter set for its configured number of days.
///
/// Configuration errors and inventory invariant violations are reported as
/// the error string.
pub fn run_single_simulation(param_set: &ParameterSet) -> Result<SimulationResult, String> {
    let params = param_set.hotel_params();
    let mut runner = build_runner(&params).map_err(|error| {
        format!(
            "{} run {}: invalid parameters: {error}",
            param_set.experiment_id, param_set.run_id
        )
    })?;
    runner.run_for_days(param_set.days, STEP_HOURS).map_err(|error| {
        format!(
            "{} run {}: simulation failed: {error}",
            param_set.experiment_id, param_set.run_id
        )
    })?;

    let result = extract_metrics(&runner);
    debug!(
        experiment = %param_set.experiment_id,
        run = param_set.run_id,
        accepted = result.accepted_bookings,
        revenue = result.revenue,
        "experiment run finished"
    );
    Ok(result)
}

/// Run every parameter set in parallel, with a progress bar.
///
/// Results come back in input order.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Result<Vec<SimulationResult>, String> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// [run_parallel_experiments] with the progress bar optional.
///
/// `num_threads` of `None` uses rayon's default pool size. The first failed
/// run fails the whole sweep.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SimulationResult>, String> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(error) => warn!(%error, "progress bar template rejected, using default style"),
        }
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder
        .build()
        .map_err(|error| format!("Failed to create thread pool: {error}"))?;

    let pb_clone = pb.clone();
    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_simulation(param_set);
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>, String>>()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    results
}
