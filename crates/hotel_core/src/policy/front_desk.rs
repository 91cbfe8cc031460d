//! State and checks shared by every booking policy.

use std::sync::Arc;

use crate::booking::Booking;
use crate::clock::{Day, SharedClock};
use crate::error::ConfigError;
use crate::inventory::RoomInventory;
use crate::room::{Cost, RoomCatalog, RoomCosts, RoomCounts, RoomType};

#[derive(Debug)]
pub struct FrontDesk {
    inventory: RoomInventory,
    /// Indexed by room type rank.
    costs: Vec<Cost>,
    clock: SharedClock,
}

impl FrontDesk {
    pub fn new(
        catalog: Arc<RoomCatalog>,
        counts: &RoomCounts,
        costs: &RoomCosts,
        clock: SharedClock,
    ) -> Result<Self, ConfigError> {
        if let Some(unknown) = costs.keys().find(|t| !catalog.contains(**t)) {
            return Err(ConfigError::UnknownRoomRank(unknown.0));
        }
        let costs = catalog
            .types()
            .map(|room_type| {
                costs
                    .get(&room_type)
                    .copied()
                    .ok_or_else(|| ConfigError::MissingRoomCost(catalog.name(room_type).to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let inventory = RoomInventory::new(catalog, counts)?;
        Ok(Self {
            inventory,
            costs,
            clock,
        })
    }

    pub fn inventory(&self) -> &RoomInventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut RoomInventory {
        &mut self.inventory
    }

    pub fn cost_of(&self, room_type: RoomType) -> Cost {
        self.costs.get(room_type.rank()).copied().unwrap_or(0)
    }

    /// The current day if `booking` is a stay the guest may arrive for today:
    /// a non-inverted range that contains the clock's day.
    pub fn arrival_day(&self, booking: &Booking) -> Option<Day> {
        if !booking.has_valid_range() {
            return None;
        }
        let today = self.clock.now().day;
        booking.covers(today).then_some(today)
    }

    /// Billing always uses the requested type, even when an upgrade was granted.
    pub fn bill(&self, booking: &Booking) -> Cost {
        self.cost_of(booking.room_type)
    }
}
