use crate::booking::{Allocation, Booking};
use crate::error::InventoryError;
use crate::inventory::RoomInventory;
use crate::room::Cost;

use super::BookingPolicyKind;

/// Trait for booking strategies layered on top of a [RoomInventory].
///
/// A policy exclusively owns its inventory. It decides which room type (if any)
/// a request is committed into, validates arrivals against those commitments and
/// bills departures.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use hotel_core::booking::{Booking, GuestId};
/// use hotel_core::clock::{ManualClock, SharedClock};
/// use hotel_core::policy::{create_policy, BookingPolicyKind};
/// use hotel_core::room::{RoomCatalog, RoomCosts, RoomCounts, RoomType};
///
/// let catalog = Arc::new(RoomCatalog::new(["Single", "Double"]).unwrap());
/// let counts: RoomCounts = [(RoomType(0), 1), (RoomType(1), 1)].into_iter().collect();
/// let costs: RoomCosts = [(RoomType(0), 3000), (RoomType(1), 4000)].into_iter().collect();
/// let clock: SharedClock = Arc::new(ManualClock::new());
///
/// let mut policy =
///     create_policy(BookingPolicyKind::Smart, catalog, &counts, &costs, clock).unwrap();
/// let outcome = policy
///     .book(&Booking::new(GuestId(1), RoomType(0), 1, 2))
///     .unwrap();
/// assert!(outcome.is_accepted());
/// ```
pub trait BookingPolicy: Send + Sync {
    fn kind(&self) -> BookingPolicyKind;

    /// Try to commit the stay.
    ///
    /// Returns [Allocation::Rejected] when no acceptable room type has capacity for
    /// the whole range, or when `day_to < day_from`. Nothing is committed on
    /// rejection. An `Err` is an inventory invariant violation, not a rejection.
    fn book(&mut self, booking: &Booking) -> Result<Allocation, InventoryError>;

    /// Validate an arrival on the current day against the committed ledger.
    ///
    /// Rejected when the range is inverted or the current day lies outside it;
    /// otherwise accepted iff the guest still holds a room for the remaining part
    /// of the stay.
    fn check_into(&self, booking: &Booking) -> bool;

    /// Price of the stay, looked up by the requested room type.
    fn bill(&self, booking: &Booking) -> Cost;

    fn inventory(&self) -> &RoomInventory;
}
