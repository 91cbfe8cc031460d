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

/// Exact-match booking: only the requested room type is ever considered.
///
/// Useful as a baseline against [super::SmartBooking]; it never substitutes a
/// different room type, so a full category rejects the request outright.
#[derive(Debug)]
pub struct TrivialBooking {
    desk: FrontDesk,
}

impl TrivialBooking {
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

impl BookingPolicy for TrivialBooking {
    fn kind(&self) -> BookingPolicyKind {
        BookingPolicyKind::Trivial
    }

    fn book(&mut self, booking: &Booking) -> Result<Allocation, InventoryError> {
        if !booking.has_valid_range() {
            return Ok(Allocation::Rejected);
        }
        let inventory = self.desk.inventory_mut();
        if !inventory.has_capacity(booking.room_type, booking.day_from, booking.day_to) {
            debug!(guest = %booking.guest, "no capacity for exact room type");
            return Ok(Allocation::Rejected);
        }
        inventory.commit(
            booking.guest,
            booking.room_type,
            booking.day_from,
            booking.day_to,
        )?;
        Ok(Allocation::Assigned(booking.room_type))
    }

    fn check_into(&self, booking: &Booking) -> bool {
        let Some(today) = self.desk.arrival_day(booking) else {
            return false;
        };
        self.desk
            .inventory()
            .has_active_booking(booking.guest, booking.room_type, today, booking.day_to)
    }

    fn bill(&self, booking: &Booking) -> Cost {
        self.desk.bill(booking)
    }

    fn inventory(&self) -> &RoomInventory {
        self.desk.inventory()
    }
}
