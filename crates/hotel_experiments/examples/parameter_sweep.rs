//! Example: compare booking policies across a preset parameter space.
//!
//! Usage: `cargo run -p hotel_experiments --example parameter_sweep [preset] [out_dir]`
//! where preset is one of `policy_comparison` (default), `capacity_sensitivity`
//! or `minimal`.

use std::path::PathBuf;

use hotel_experiments::parameter_spaces::space_by_name;
use hotel_experiments::{
    export_runs_to_json, export_to_csv, find_best_parameters, find_best_result_index,
    run_parallel_experiments, ScoreWeights,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "policy_comparison".to_string());
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let space = space_by_name(&preset).ok_or_else(|| format!("unknown preset '{preset}'"))?;
    let parameter_sets = space.generate();
    println!("Running {} simulations ({preset})...", parameter_sets.len());

    let results = run_parallel_experiments(parameter_sets.clone(), None)?;
    println!("Completed {} simulations", results.len());

    let weights = ScoreWeights::default();
    let best_idx = find_best_result_index(&results, &weights).ok_or("No results to analyze")?;
    let best = &results[best_idx];
    println!("\n=== Best Run ===");
    println!("Acceptance rate: {:.2}%", best.acceptance_rate * 100.0);
    println!("Revenue: {} ({:.0}/day)", best.revenue, best.revenue_per_day);
    println!("Weighted occupancy: {:.2}%", best.weighted_occupancy * 100.0);
    println!("Upgrades: {}", best.upgrades);
    println!("Occupancy by type: {}", best.occupancy_summary());

    if let Some(best_params) = find_best_parameters(&results, &parameter_sets, &weights) {
        println!("\n=== Best Parameters ===");
        println!("Experiment: {} (seed {})", best_params.experiment_id, best_params.seed);
        println!("Policy: {}", best_params.params.policy);
        println!("Total rooms: {}", best_params.params.total_rooms());
        println!(
            "Mean inter-arrival: {:.1}h",
            best_params.params.demand.inter_arrival.mean_hours()?
        );
    }

    std::fs::create_dir_all(&out_dir)?;
    let csv_path = out_dir.join("experiment_results.csv");
    let json_path = out_dir.join("experiment_results.json");
    export_to_csv(&results, &parameter_sets, &csv_path)?;
    export_runs_to_json(&results, &parameter_sets, &json_path)?;
    println!("\nExported to {} and {}", csv_path.display(), json_path.display());

    Ok(())
}
