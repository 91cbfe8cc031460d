//! Hotel room allocation engine and demand simulator.
//!
//! [policy] decides which room type a stay is committed into, backed by the
//! per-day ledger in [inventory]. [simulation::HotelSimulator] drives a policy
//! with synthetic demand one tick at a time, and [telemetry::HotelTelemetry]
//! aggregates the outcomes. [runner::HotelRunner] is a ready-made external
//! driver over a manual clock.

pub mod booking;
pub mod clock;
pub mod demand;
pub mod distributions;
pub mod ecs;
pub mod error;
pub mod events;
pub mod inventory;
pub mod policy;
pub mod room;
pub mod runner;
pub mod scenario;
pub mod simulation;
pub mod systems;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
