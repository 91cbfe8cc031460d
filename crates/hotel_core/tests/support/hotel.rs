use std::sync::Arc;

use hotel_core::booking::{Booking, GuestId};
use hotel_core::clock::{Day, ManualClock, SimTime};
use hotel_core::inventory::RoomInventory;
use hotel_core::policy::{create_policy, BookingPolicy, BookingPolicyKind};
use hotel_core::room::{Cost, RoomCatalog, RoomCosts, RoomCounts, RoomType};

/// Builder for a policy over a small, explicit catalog.
#[derive(Clone, Debug)]
pub struct HotelBuilder {
    rooms: Vec<(String, u32, Cost)>,
    kind: BookingPolicyKind,
    start: SimTime,
}

impl Default for HotelBuilder {
    fn default() -> Self {
        Self {
            rooms: Vec::new(),
            kind: BookingPolicyKind::Smart,
            start: SimTime::default(),
        }
    }
}

impl HotelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a room type; call in upgrade order.
    pub fn room(mut self, name: &str, count: u32, cost: Cost) -> Self {
        self.rooms.push((name.to_string(), count, cost));
        self
    }

    pub fn kind(mut self, kind: BookingPolicyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn starting_on(mut self, day: Day) -> Self {
        self.start = SimTime::new(day, 0);
        self
    }

    pub fn build(self) -> Hotel {
        let catalog = Arc::new(
            RoomCatalog::new(self.rooms.iter().map(|(name, _, _)| name.clone()))
                .expect("valid catalog"),
        );
        let counts: RoomCounts = self
            .rooms
            .iter()
            .enumerate()
            .map(|(rank, (_, count, _))| (RoomType(rank as u8), *count))
            .collect();
        let costs: RoomCosts = self
            .rooms
            .iter()
            .enumerate()
            .map(|(rank, (_, _, cost))| (RoomType(rank as u8), *cost))
            .collect();
        let clock = Arc::new(ManualClock::starting_at(self.start));
        let policy = create_policy(self.kind, catalog.clone(), &counts, &costs, clock.clone())
            .expect("valid policy");
        Hotel {
            catalog,
            policy,
            clock,
        }
    }
}

pub struct Hotel {
    pub catalog: Arc<RoomCatalog>,
    pub policy: Box<dyn BookingPolicy>,
    pub clock: Arc<ManualClock>,
}

impl Hotel {
    pub fn room_type(&self, name: &str) -> RoomType {
        self.catalog.lookup(name).expect("known room type")
    }

    pub fn booking(&self, guest: u64, name: &str, day_from: Day, day_to: Day) -> Booking {
        Booking::new(GuestId(guest), self.room_type(name), day_from, day_to)
    }

    pub fn set_day(&self, day: Day) {
        assert!(self.clock.set(SimTime::new(day, 0)), "clock cannot go back");
    }

    pub fn inventory(&self) -> &RoomInventory {
        self.policy.inventory()
    }
}

/// Panics if any type is over capacity on any day in `days`.
pub fn assert_capacity_invariant(inventory: &RoomInventory, days: impl IntoIterator<Item = Day>) {
    let days: Vec<Day> = days.into_iter().collect();
    for room_type in inventory.catalog().types() {
        let capacity = inventory.capacity(room_type);
        for day in &days {
            let occupied = inventory.occupied(room_type, *day);
            assert!(
                occupied <= capacity,
                "{room_type} over capacity on day {day}: {occupied} > {capacity}"
            );
        }
    }
}
