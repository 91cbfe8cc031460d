//! Test helpers for common test setup and utilities.
//!
//! Shared by unit tests and, through the `test-helpers` feature, by the
//! integration tests and benchmarks.

use std::sync::Arc;

use bevy_ecs::prelude::World;

use crate::clock::{CurrentTime, ManualClock, SimTime};
use crate::ecs::{InventoryFault, StayQueues};
use crate::events::HotelEventLog;
use crate::policy::{create_policy, BookingPolicy, BookingPolicyKind, BookingPolicyResource};
use crate::room::{Cost, RoomCatalog, RoomCosts, RoomCounts, RoomType};

pub const SINGLE: RoomType = RoomType(0);
pub const DOUBLE: RoomType = RoomType(1);

pub const SINGLE_COST: Cost = 3000;
pub const DOUBLE_COST: Cost = 4000;

/// `Single` then `Double`.
pub fn two_type_catalog() -> RoomCatalog {
    RoomCatalog::new(["Single", "Double"]).expect("two-type catalog is valid")
}

pub fn counts_of(values: &[u32]) -> RoomCounts {
    values
        .iter()
        .enumerate()
        .map(|(rank, count)| (RoomType(rank as u8), *count))
        .collect()
}

pub fn costs_of(values: &[Cost]) -> RoomCosts {
    values
        .iter()
        .enumerate()
        .map(|(rank, cost)| (RoomType(rank as u8), *cost))
        .collect()
}

/// A policy of `kind` over the two-type catalog, with its clock at day 0.
pub fn two_type_policy_of(
    kind: BookingPolicyKind,
    counts: [u32; 2],
) -> (Box<dyn BookingPolicy>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let policy = create_policy(
        kind,
        Arc::new(two_type_catalog()),
        &counts_of(&counts),
        &costs_of(&[SINGLE_COST, DOUBLE_COST]),
        clock.clone(),
    )
    .expect("two-type policy is valid");
    (policy, clock)
}

/// Smart policy over the two-type catalog.
pub fn two_type_policy(counts: [u32; 2]) -> (Box<dyn BookingPolicy>, Arc<ManualClock>) {
    two_type_policy_of(BookingPolicyKind::Smart, counts)
}

/// A world holding every resource the step systems read, except the demand
/// generator.
pub fn create_test_world(policy: Box<dyn BookingPolicy>, now: SimTime) -> World {
    let mut world = World::new();
    world.insert_resource(CurrentTime(now));
    world.insert_resource(BookingPolicyResource::new(policy));
    world.insert_resource(StayQueues::default());
    world.insert_resource(HotelEventLog::default());
    world.insert_resource(InventoryFault::default());
    world
}
