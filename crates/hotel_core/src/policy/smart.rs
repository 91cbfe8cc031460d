use std::sync::Arc;

use tracing::debug;

use crate::booking::{Allocation, Booking};
use crate::clock::SharedClock;
use crate::error::{ConfigError, InventoryError};
use crate::inventory::RoomInventory;
use crate::room::{Cost, RoomCatalog, RoomCosts, RoomCounts};

use super::algorithm::BookingPolicy;
use super::front_desk::FrontDesk;
use super::BookingPolicyKind;

/// Upgrade-cascading booking.
///
/// The suitable types for a request are the requested type followed by every
/// type ranked after it in the catalog. Booking takes the first suitable type
/// with capacity for the whole stay; it never downgrades.
///
/// The granted type is not remembered. Check-in re-derives the suitable types
/// from the requested one and accepts if any of them still holds the guest.
#[derive(Debug)]
pub struct SmartBooking {
    desk: FrontDesk,
}

impl SmartBooking {
    pub fn new(
        catalog: Arc<RoomCatalog>,
        counts: &RoomCounts,
        costs: &RoomCosts,
        clock: SharedClock,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            desk: FrontDesk::new(catalog, counts, costs, clock)?,
        })
    }
}

impl BookingPolicy for SmartBooking {
    fn kind(&self) -> BookingPolicyKind {
        BookingPolicyKind::Smart
    }

    fn book(&mut self, booking: &Booking) -> Result<Allocation, InventoryError> {
        if !booking.has_valid_range() {
            return Ok(Allocation::Rejected);
        }
        let inventory = self.desk.inventory();
        let candidate = inventory
            .catalog()
            .suitable_for(booking.room_type)
            .find(|room_type| inventory.has_capacity(*room_type, booking.day_from, booking.day_to));

        let Some(room_type) = candidate else {
            debug!(guest = %booking.guest, "no suitable room type has capacity");
            return Ok(Allocation::Rejected);
        };
        if room_type != booking.room_type {
            debug!(
                guest = %booking.guest,
                requested = %booking.room_type,
                assigned = %room_type,
                "upgrading booking"
            );
        }
        self.desk
            .inventory_mut()
            .commit(booking.guest, room_type, booking.day_from, booking.day_to)?;
        Ok(Allocation::Assigned(room_type))
    }

    fn check_into(&self, booking: &Booking) -> bool {
        let Some(today) = self.desk.arrival_day(booking) else {
            return false;
        };
        let inventory = self.desk.inventory();
        inventory
            .catalog()
            .suitable_for(booking.room_type)
            .any(|room_type| {
                inventory.has_active_booking(booking.guest, room_type, today, booking.day_to)
            })
    }

    fn bill(&self, booking: &Booking) -> Cost {
        self.desk.bill(booking)
    }

    fn inventory(&self) -> &RoomInventory {
        self.desk.inventory()
    }
}
