use hotel_core::policy::BookingPolicyKind;
use hotel_core::scenario::{build_runner, HotelParams, InterArrivalParams};

#[test]
#[ignore = "long run; use `cargo test -- --ignored`"]
fn year_long_run_with_hourly_steps() {
    for kind in BookingPolicyKind::ALL {
        let params = HotelParams::default()
            .with_policy(kind)
            .with_inter_arrival(InterArrivalParams::Exponential { mean_hours: 1.5 })
            .with_seed(7);
        let mut runner = build_runner(&params).unwrap();
        let steps = runner.run_for_days(365, 1).unwrap();
        assert_eq!(steps, 365 * 24);

        let telemetry = runner.telemetry();
        assert_eq!(telemetry.days_recorded(), 366);
        assert!(telemetry.total_bookings() > 3_500);
        let occupancy = telemetry.weighted_mean_occupancy();
        assert!((0.0..=1.0).contains(&occupancy));
    }
}
