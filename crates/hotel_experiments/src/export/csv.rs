use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;

const HEADER: [&str; 22] = [
    "experiment_id",
    "run_id",
    "seed",
    "policy",
    "total_rooms",
    "mean_inter_arrival_hours",
    "days",
    "days_simulated",
    "steps",
    "total_bookings",
    "accepted_bookings",
    "rejected_bookings",
    "acceptance_rate",
    "upgrades",
    "check_ins",
    "missed_check_ins",
    "check_outs",
    "guests_in_house",
    "revenue",
    "revenue_per_day",
    "weighted_occupancy",
    "occupancy_by_type",
];

pub(crate) fn export_to_csv_impl(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(HEADER)?;

    for (result, param_set) in results.iter().zip(parameter_sets.iter()) {
        let params = &param_set.params;
        wtr.write_record([
            param_set.experiment_id.clone(),
            param_set.run_id.to_string(),
            param_set.seed.to_string(),
            params.policy.to_string(),
            params.total_rooms().to_string(),
            params
                .demand
                .inter_arrival
                .mean_hours()
                .map(|hours| hours.to_string())
                .unwrap_or_default(),
            param_set.days.to_string(),
            result.days_simulated.to_string(),
            result.steps.to_string(),
            result.total_bookings.to_string(),
            result.accepted_bookings.to_string(),
            result.rejected_bookings.to_string(),
            result.acceptance_rate.to_string(),
            result.upgrades.to_string(),
            result.check_ins.to_string(),
            result.missed_check_ins.to_string(),
            result.check_outs.to_string(),
            result.guests_in_house.to_string(),
            result.revenue.to_string(),
            result.revenue_per_day.to_string(),
            result.weighted_occupancy.to_string(),
            result.occupancy_summary(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
