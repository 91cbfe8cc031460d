//! Scenario setup: hotel parameters and the builders that turn them into a
//! ready-to-step simulator.

mod build;
mod params;

pub use build::{build_policy, build_runner, build_simulator};
pub use params::{DemandParams, HotelParams, InterArrivalParams};
