//! Room inventory: per-type capacity and the per-type, per-day occupancy ledger.
//!
//! Invariant: for every room type `t` and day `d`,
//! `ledger[t][d].len() <= capacity[t]`. A type with zero capacity is never
//! available.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::booking::GuestId;
use crate::clock::Day;
use crate::error::{ConfigError, InventoryError};
use crate::room::{RoomCatalog, RoomCounts, RoomType};

type DayLedger = BTreeMap<Day, BTreeSet<GuestId>>;

#[derive(Debug, Clone)]
pub struct RoomInventory {
    catalog: Arc<RoomCatalog>,
    /// Indexed by room type rank.
    capacity: Vec<u32>,
    /// Indexed by room type rank.
    ledger: Vec<DayLedger>,
}

impl RoomInventory {
    /// Every catalog type needs a count, even if it is zero.
    pub fn new(catalog: Arc<RoomCatalog>, counts: &RoomCounts) -> Result<Self, ConfigError> {
        if let Some(unknown) = counts.keys().find(|t| !catalog.contains(**t)) {
            return Err(ConfigError::UnknownRoomRank(unknown.0));
        }
        let capacity = catalog
            .types()
            .map(|room_type| {
                counts
                    .get(&room_type)
                    .copied()
                    .ok_or_else(|| ConfigError::MissingRoomCount(catalog.name(room_type).to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ledger = vec![DayLedger::new(); capacity.len()];
        Ok(Self {
            catalog,
            capacity,
            ledger,
        })
    }

    pub fn catalog(&self) -> &Arc<RoomCatalog> {
        &self.catalog
    }

    pub fn capacity(&self, room_type: RoomType) -> u32 {
        self.capacity.get(room_type.rank()).copied().unwrap_or(0)
    }

    pub fn total_capacity(&self) -> u64 {
        self.capacity.iter().map(|c| *c as u64).sum()
    }

    /// Number of guests holding a room of `room_type` on `day`.
    pub fn occupied(&self, room_type: RoomType, day: Day) -> u32 {
        self.ledger
            .get(room_type.rank())
            .and_then(|days| days.get(&day))
            .map_or(0, |guests| guests.len() as u32)
    }

    pub fn free_rooms(&self, room_type: RoomType, day: Day) -> u32 {
        self.capacity(room_type)
            .saturating_sub(self.occupied(room_type, day))
    }

    pub fn guests(&self, room_type: RoomType, day: Day) -> impl Iterator<Item = GuestId> + '_ {
        self.ledger
            .get(room_type.rank())
            .and_then(|days| days.get(&day))
            .into_iter()
            .flat_map(|guests| guests.iter().copied())
    }

    /// True iff every day of `[day_from, day_to]` has room for one more guest.
    pub fn has_capacity(&self, room_type: RoomType, day_from: Day, day_to: Day) -> bool {
        let capacity = self.capacity(room_type);
        if capacity == 0 {
            return false;
        }
        (day_from..=day_to).all(|day| self.occupied(room_type, day) < capacity)
    }

    /// Record `guest` in the ledger for every day of the range.
    ///
    /// All days are validated before any insert, so a failed commit leaves the
    /// ledger untouched. Callers must gate this behind [Self::has_capacity] on the
    /// same type and range; an error here means that contract was broken.
    pub fn commit(
        &mut self,
        guest: GuestId,
        room_type: RoomType,
        day_from: Day,
        day_to: Day,
    ) -> Result<(), InventoryError> {
        if day_to < day_from {
            return Err(InventoryError::EmptyStay { day_from, day_to });
        }
        let capacity = self.capacity(room_type);
        if let Some(day) = (day_from..=day_to).find(|day| self.occupied(room_type, *day) >= capacity) {
            return Err(InventoryError::CapacityExceeded {
                room_type: self.catalog.name(room_type).to_string(),
                day,
                capacity,
            });
        }

        let days = &mut self.ledger[room_type.rank()];
        for day in day_from..=day_to {
            days.entry(day).or_default().insert(guest);
        }
        Ok(())
    }

    /// True iff `guest` holds a room of `room_type` on every day of the range.
    pub fn has_active_booking(
        &self,
        guest: GuestId,
        room_type: RoomType,
        day_from: Day,
        day_to: Day,
    ) -> bool {
        let Some(days) = self.ledger.get(room_type.rank()) else {
            return false;
        };
        (day_from..=day_to).all(|day| days.get(&day).is_some_and(|guests| guests.contains(&guest)))
    }
}
