//! Metrics extraction from finished hotel runs.

use std::collections::BTreeMap;

use hotel_core::booking::BookingState;
use hotel_core::runner::HotelRunner;
use hotel_core::telemetry::HotelTelemetry;
use serde::Serialize;

/// Aggregated outcome of a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Days sampled by the runner, including the starting day.
    pub days_simulated: u64,
    /// Simulator ticks executed.
    pub steps: u64,
    pub total_bookings: u64,
    pub accepted_bookings: u64,
    pub rejected_bookings: u64,
    /// Accepted / total; 0.0 when no booking was requested.
    pub acceptance_rate: f64,
    /// Accepted bookings placed into a more expensive type than requested.
    pub upgrades: u64,
    pub check_ins: u64,
    pub missed_check_ins: u64,
    pub check_outs: u64,
    /// Guests still in house when the run stopped.
    pub guests_in_house: u64,
    /// Sum of all bills, in the smallest currency unit.
    pub revenue: u64,
    pub revenue_per_day: f64,
    /// Mean daily occupancy per room type name.
    pub occupancy_by_type: BTreeMap<String, f64>,
    /// Mean occupancy over all types, weighted by capacity.
    pub weighted_occupancy: f64,
}

impl SimulationResult {
    fn from_telemetry(telemetry: &HotelTelemetry, occupancy_by_type: BTreeMap<String, f64>, steps: u64) -> Self {
        let days = telemetry.days_recorded();
        Self {
            days_simulated: days,
            steps,
            total_bookings: telemetry.total_bookings(),
            accepted_bookings: telemetry.accepted_bookings(),
            rejected_bookings: telemetry.rejected_bookings(),
            acceptance_rate: telemetry.acceptance_rate(),
            upgrades: telemetry.upgrades(),
            check_ins: telemetry.check_ins(),
            missed_check_ins: telemetry.missed_check_ins(),
            check_outs: telemetry.check_outs(),
            guests_in_house: telemetry.guests_in(BookingState::CheckedIn),
            revenue: telemetry.revenue(),
            revenue_per_day: if days == 0 {
                0.0
            } else {
                telemetry.revenue() as f64 / days as f64
            },
            occupancy_by_type,
            weighted_occupancy: telemetry.weighted_mean_occupancy(),
        }
    }

    /// Per-type occupancy as `Name=0.123;Other=0.456`, in catalog name order.
    pub fn occupancy_summary(&self) -> String {
        self.occupancy_by_type
            .iter()
            .map(|(name, value)| format!("{name}={value:.4}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Extract metrics from a runner that has finished its run.
pub fn extract_metrics(runner: &HotelRunner) -> SimulationResult {
    let telemetry = runner.telemetry();
    let catalog = runner.simulator().inventory().catalog();
    let occupancy_by_type = catalog
        .types()
        .map(|room_type| {
            (
                catalog.name(room_type).to_string(),
                telemetry.mean_occupancy(room_type),
            )
        })
        .collect();
    SimulationResult::from_telemetry(telemetry, occupancy_by_type, runner.simulator().steps())
}

#[cfg(test)]
pub(crate) fn sample_result(acceptance_rate: f64, revenue: u64, occupancy: f64, upgrades: u64) -> SimulationResult {
    let total = 100;
    let accepted = (acceptance_rate * total as f64).round() as u64;
    SimulationResult {
        days_simulated: 30,
        steps: 720,
        total_bookings: total,
        accepted_bookings: accepted,
        rejected_bookings: total - accepted,
        acceptance_rate,
        upgrades,
        check_ins: accepted,
        missed_check_ins: 0,
        check_outs: accepted,
        guests_in_house: 0,
        revenue,
        revenue_per_day: revenue as f64 / 30.0,
        occupancy_by_type: BTreeMap::from([("Single".to_string(), occupancy)]),
        weighted_occupancy: occupancy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_core::scenario::{build_runner, HotelParams};

    #[test]
    fn metrics_mirror_telemetry() {
        let params = HotelParams::default().with_seed(5);
        let mut runner = build_runner(&params).unwrap();
        runner.run_for_days(10, 1).unwrap();

        let result = extract_metrics(&runner);
        let telemetry = runner.telemetry();
        assert_eq!(result.total_bookings, telemetry.total_bookings());
        assert_eq!(result.revenue, telemetry.revenue());
        assert_eq!(result.days_simulated, 11);
        assert_eq!(result.steps, 240);
        assert_eq!(result.occupancy_by_type.len(), 5);
        assert!(result.occupancy_by_type.values().all(|o| (0.0..=1.0).contains(o)));
        assert!(result.acceptance_rate > 0.0);
    }

    #[test]
    fn summary_lists_every_type() {
        let result = sample_result(0.5, 1000, 0.25, 0);
        assert_eq!(result.occupancy_summary(), "Single=0.2500");
    }
}
