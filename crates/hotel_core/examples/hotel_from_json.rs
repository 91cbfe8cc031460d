//! Load hotel parameters from a JSON file and run them.
//!
//! Run with: cargo run -p hotel_core --example hotel_from_json -- params.json [days]
//! Without a path, the default parameters are printed as a starting point.

use std::env;
use std::fs;

use hotel_core::scenario::{build_runner, HotelParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        println!("{}", HotelParams::default().to_json_string()?);
        return Ok(());
    };
    let days: u32 = args.next().map(|d| d.parse::<u32>()).transpose()?.unwrap_or(30);

    let params = HotelParams::from_json_str(&fs::read_to_string(&path)?)?;
    let mut runner = build_runner(&params)?;
    runner.run_for_days(days, 1)?;

    let telemetry = runner.telemetry();
    println!(
        "{path}: {} policy, {days} days, {} of {} bookings accepted, revenue {}, occupancy {:.1}%",
        params.policy,
        telemetry.accepted_bookings(),
        telemetry.total_bookings(),
        telemetry.revenue(),
        telemetry.weighted_mean_occupancy() * 100.0
    );
    Ok(())
}
