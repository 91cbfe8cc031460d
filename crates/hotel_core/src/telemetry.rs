//! Outcome aggregation: booking counters and daily occupancy samples.
//!
//! [HotelTelemetry] only observes. Counters are fed through the
//! [HotelObserver] callbacks; occupancy is sampled by the driver once per
//! simulated day with [HotelTelemetry::record_day].

use std::collections::HashMap;

use serde::Serialize;

use crate::booking::{Allocation, Booking, BookingState, GuestId};
use crate::clock::Day;
use crate::events::{HotelEvent, HotelObserver};
use crate::inventory::RoomInventory;
use crate::room::{Cost, RoomType};

/// Occupancy of one room type on one day, as `busy / capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OccupancySample {
    pub day: Day,
    pub fraction: f64,
}

#[derive(Debug, Default, Clone)]
pub struct HotelTelemetry {
    accepted: u64,
    rejected: u64,
    upgrades: u64,
    check_ins: u64,
    missed_check_ins: u64,
    check_outs: u64,
    revenue: Cost,
    /// Indexed by room type rank; last capacity seen for the type.
    capacity: Vec<u32>,
    /// Indexed by room type rank.
    samples: Vec<Vec<OccupancySample>>,
    days_recorded: u64,
    /// Guests whose booking can still produce events.
    in_flight: HashMap<GuestId, BookingState>,
    /// Guests that reached a terminal state, counted per state.
    settled: HashMap<BookingState, u64>,
}

impl HotelTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_events(&mut self, events: &[HotelEvent]) {
        for event in events {
            event.dispatch(self);
        }
    }

    /// Sample every room type's occupancy for `day`.
    pub fn record_day(&mut self, day: Day, inventory: &RoomInventory) {
        for room_type in inventory.catalog().types() {
            self.record_type_sample(
                room_type,
                day,
                inventory.occupied(room_type, day),
                inventory.capacity(room_type),
            );
        }
        self.days_recorded += 1;
    }

    /// Record one sample. Zero-capacity types are never available and record nothing.
    pub fn record_type_sample(&mut self, room_type: RoomType, day: Day, busy: u32, capacity: u32) {
        let rank = room_type.rank();
        if self.samples.len() <= rank {
            self.samples.resize_with(rank + 1, Vec::new);
            self.capacity.resize(rank + 1, 0);
        }
        self.capacity[rank] = capacity;
        if capacity == 0 {
            return;
        }
        self.samples[rank].push(OccupancySample {
            day,
            fraction: busy as f64 / capacity as f64,
        });
    }

    pub fn total_bookings(&self) -> u64 {
        self.accepted + self.rejected
    }

    pub fn accepted_bookings(&self) -> u64 {
        self.accepted
    }

    pub fn rejected_bookings(&self) -> u64 {
        self.rejected
    }

    /// Accepted bookings that were committed into a higher-ranked type.
    pub fn upgrades(&self) -> u64 {
        self.upgrades
    }

    pub fn check_ins(&self) -> u64 {
        self.check_ins
    }

    pub fn missed_check_ins(&self) -> u64 {
        self.missed_check_ins
    }

    pub fn check_outs(&self) -> u64 {
        self.check_outs
    }

    /// Sum of all bills.
    pub fn revenue(&self) -> Cost {
        self.revenue
    }

    pub fn days_recorded(&self) -> u64 {
        self.days_recorded
    }

    pub fn acceptance_rate(&self) -> f64 {
        match self.total_bookings() {
            0 => 0.0,
            total => self.accepted as f64 / total as f64,
        }
    }

    pub fn occupancy_series(&self, room_type: RoomType) -> &[OccupancySample] {
        self.samples
            .get(room_type.rank())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Average of the type's daily samples; 0.0 when it has none.
    pub fn mean_occupancy(&self, room_type: RoomType) -> f64 {
        let series = self.occupancy_series(room_type);
        if series.is_empty() {
            return 0.0;
        }
        series.iter().map(|s| s.fraction).sum::<f64>() / series.len() as f64
    }

    /// Mean occupancy across all types, each weighted by its capacity.
    pub fn weighted_mean_occupancy(&self) -> f64 {
        let (weighted, total) = self
            .capacity
            .iter()
            .enumerate()
            .filter(|(rank, _)| !self.samples[*rank].is_empty())
            .fold((0.0, 0u64), |(weighted, total), (rank, capacity)| {
                let mean = self.mean_occupancy(RoomType(rank as u8));
                (weighted + mean * *capacity as f64, total + *capacity as u64)
            });
        if total == 0 {
            0.0
        } else {
            weighted / total as f64
        }
    }

    /// Current state of a guest still in flight. Settled guests are
    /// forgotten and only counted, so this is `None` for them.
    pub fn state_of(&self, guest: GuestId) -> Option<BookingState> {
        self.in_flight.get(&guest).copied()
    }

    pub fn guests_in(&self, state: BookingState) -> u64 {
        if state.is_terminal() {
            self.settled.get(&state).copied().unwrap_or(0)
        } else {
            self.in_flight.values().filter(|s| **s == state).count() as u64
        }
    }

    pub fn guests_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn transition(&mut self, guest: GuestId, state: BookingState) {
        if state.is_terminal() {
            self.in_flight.remove(&guest);
            *self.settled.entry(state).or_default() += 1;
        } else {
            self.in_flight.insert(guest, state);
        }
    }
}

impl HotelObserver for HotelTelemetry {
    fn on_book(&mut self, booking: &Booking, allocation: Allocation) {
        if allocation.is_accepted() {
            self.accepted += 1;
            if allocation.is_upgrade_of(booking.room_type) {
                self.upgrades += 1;
            }
        } else {
            self.rejected += 1;
        }
        self.transition(booking.guest, BookingState::after_booking(allocation));
    }

    fn on_check_in(&mut self, booking: &Booking, success: bool) {
        if success {
            self.check_ins += 1;
        } else {
            self.missed_check_ins += 1;
        }
        self.transition(booking.guest, BookingState::after_check_in(success));
    }

    fn on_check_out(&mut self, booking: &Booking, cost: Cost) {
        self.check_outs += 1;
        self.revenue += cost;
        self.transition(booking.guest, BookingState::CheckedOut);
    }
}
