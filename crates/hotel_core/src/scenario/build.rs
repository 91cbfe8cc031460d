use std::sync::Arc;

use tracing::debug;

use crate::clock::{ManualClock, SharedClock};
use crate::error::ConfigError;
use crate::policy::{create_policy, BookingPolicy};
use crate::runner::HotelRunner;
use crate::scenario::params::HotelParams;
use crate::simulation::HotelSimulator;

/// Validate the room tables and build the configured policy over them.
pub fn build_policy(
    params: &HotelParams,
    clock: SharedClock,
) -> Result<Box<dyn BookingPolicy>, ConfigError> {
    let catalog = Arc::new(params.catalog()?);
    let counts = params.room_counts(&catalog)?;
    let costs = params.room_costs(&catalog)?;
    debug!(
        policy = %params.policy,
        room_types = catalog.len(),
        total_rooms = params.total_rooms(),
        "building booking policy"
    );
    create_policy(params.policy, catalog, &counts, &costs, clock)
}

/// Build a simulator reading `clock`. Every configuration error surfaces here,
/// before the first step.
pub fn build_simulator(
    params: &HotelParams,
    clock: SharedClock,
) -> Result<HotelSimulator, ConfigError> {
    let policy = build_policy(params, clock.clone())?;
    let demand = params.demand_config(policy.inventory().catalog())?;
    HotelSimulator::new(policy, demand, clock)
}

/// Build a runner driving its own manual clock from day 0.
pub fn build_runner(params: &HotelParams) -> Result<HotelRunner, ConfigError> {
    let clock = Arc::new(ManualClock::new());
    let policy = build_policy(params, clock.clone())?;
    let demand = params.demand_config(policy.inventory().catalog())?;
    HotelRunner::new(policy, demand, clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::BookingPolicyKind;
    use crate::room::RoomType;

    #[test]
    fn missing_count_aborts_construction() {
        let mut params = HotelParams::default();
        params.room_counts.remove("HalfLux");
        let err = build_runner(&params).err().unwrap();
        assert_eq!(err, ConfigError::MissingRoomCount("HalfLux".to_string()));
    }

    #[test]
    fn missing_cost_aborts_construction() {
        let mut params = HotelParams::default();
        params.room_costs.remove("Lux");
        let err = build_simulator(&params, Arc::new(ManualClock::new()))
            .err()
            .unwrap();
        assert_eq!(err, ConfigError::MissingRoomCost("Lux".to_string()));
    }

    #[test]
    fn unknown_count_is_rejected() {
        let params = HotelParams::default().with_room_count("Penthouse", 1);
        assert_eq!(
            build_runner(&params).err(),
            Some(ConfigError::UnknownRoomType("Penthouse".to_string()))
        );
    }

    #[test]
    fn overflowing_weights_from_json_are_a_config_error() {
        let params = HotelParams::from_json_str(
            r#"{"demand":{"room_weights":{"Single":1e308,"Double":1e308}}}"#,
        )
        .unwrap();
        assert!(matches!(
            build_runner(&params).err(),
            Some(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn oversized_stay_from_json_is_a_config_error() {
        let params =
            HotelParams::from_json_str(r#"{"demand":{"stay_days_max":4294967295}}"#).unwrap();
        assert!(matches!(
            build_runner(&params).err(),
            Some(ConfigError::InvalidRange { what: "stay days", .. })
        ));
    }

    #[test]
    fn builds_configured_policy() {
        let params = HotelParams::empty()
            .with_room("Single", 1, 10)
            .with_room("Double", 0, 20)
            .with_policy(BookingPolicyKind::Trivial)
            .with_seed(1);
        let runner = build_runner(&params).unwrap();
        let policy = runner.simulator().policy();
        assert_eq!(policy.kind(), BookingPolicyKind::Trivial);
        assert_eq!(policy.inventory().capacity(RoomType(1)), 0);
    }
}
