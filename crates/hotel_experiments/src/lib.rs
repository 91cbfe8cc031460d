//! Parameter sweeps over the hotel booking simulation.
//!
//! Runs many simulations in parallel with varying policies, capacities and
//! demand levels, extracts per-run metrics and ranks the runs by a weighted
//! score.
//!
//! # Quick Start
//!
//! ```no_run
//! use hotel_core::policy::BookingPolicyKind;
//! use hotel_experiments::{find_best_result_index, run_parallel_experiments, ParameterSpace, ScoreWeights};
//!
//! let space = ParameterSpace::grid()
//!     .policy_kinds(BookingPolicyKind::ALL.to_vec())
//!     .capacity_scales(vec![0.5, 1.0, 2.0])
//!     .seeds(vec![1, 2, 3]);
//!
//! let results = run_parallel_experiments(space.generate(), None).unwrap();
//! let best = find_best_result_index(&results, &ScoreWeights::default());
//! ```
//!
//! # Modules
//!
//! - [`parameters`]: grid search and random sampling
//! - [`parameter_spaces`]: preset spaces
//! - [`runner`]: parallel execution with rayon
//! - [`metrics`]: per-run metrics
//! - [`scoring`]: weighted scores
//! - [`export`]: CSV/JSON export and ranking

pub mod export;
pub mod metrics;
pub mod parameter_spaces;
pub mod parameters;
pub mod runner;
pub mod scoring;

pub use export::{
    export_runs_to_json, export_to_csv, export_to_json, find_best_parameters,
    find_best_result_index,
};
pub use metrics::SimulationResult;
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_parallel_experiments_with_progress, run_single_simulation};
pub use scoring::{calculate_scores, ScoreWeights};
