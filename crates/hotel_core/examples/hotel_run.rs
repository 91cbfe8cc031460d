//! Run the default hotel for 90 days under both booking policies and print
//! the outcome.
//!
//! Run with: cargo run -p hotel_core --example hotel_run [days]
//! Set RUST_LOG=hotel_core=debug for per-booking decisions.

use hotel_core::policy::BookingPolicyKind;
use hotel_core::scenario::{build_runner, HotelParams};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let days: u32 = std::env::args()
        .nth(1)
        .map(|d| d.parse::<u32>())
        .transpose()?
        .unwrap_or(90);
    const STEP_HOURS: u32 = 1;
    const SEED: u64 = 123;

    for kind in BookingPolicyKind::ALL {
        let params = HotelParams::default().with_policy(kind).with_seed(SEED);
        let catalog = params.catalog()?;
        let mut runner = build_runner(&params)?;
        let steps = runner.run_for_days(days, STEP_HOURS)?;
        let telemetry = runner.telemetry();

        println!("--- {kind} policy ({days} days, {STEP_HOURS}h steps, seed {SEED}) ---");
        println!("Steps executed: {steps}");
        println!(
            "Bookings: {} total, {} accepted ({:.1}%), {} upgraded",
            telemetry.total_bookings(),
            telemetry.accepted_bookings(),
            telemetry.acceptance_rate() * 100.0,
            telemetry.upgrades()
        );
        println!(
            "Check-ins: {} ({} missed), check-outs: {}",
            telemetry.check_ins(),
            telemetry.missed_check_ins(),
            telemetry.check_outs()
        );
        println!("Revenue: {}", telemetry.revenue());
        for descriptor in catalog.descriptors() {
            println!(
                "  {:<16} mean occupancy {:>5.1}%",
                descriptor.name,
                telemetry.mean_occupancy(descriptor.room_type) * 100.0
            );
        }
        println!(
            "  {:<16} mean occupancy {:>5.1}%\n",
            "(weighted)",
            telemetry.weighted_mean_occupancy() * 100.0
        );
    }
    Ok(())
}
