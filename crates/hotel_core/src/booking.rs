use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Day;
use crate::room::RoomType;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GuestId(pub u64);

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guest-{}", self.0)
    }
}

/// A request binding a guest to a room type for the inclusive day range
/// `[day_from, day_to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Booking {
    pub guest: GuestId,
    pub room_type: RoomType,
    pub day_from: Day,
    pub day_to: Day,
}

impl Booking {
    pub fn new(guest: GuestId, room_type: RoomType, day_from: Day, day_to: Day) -> Self {
        Self {
            guest,
            room_type,
            day_from,
            day_to,
        }
    }

    /// `false` when `day_to < day_from`; such a request can never be accepted.
    pub fn has_valid_range(&self) -> bool {
        self.day_from <= self.day_to
    }

    /// Days covered by the stay, both ends included.
    pub fn nights(&self) -> u64 {
        if self.has_valid_range() {
            u64::from(self.day_to - self.day_from) + 1
        } else {
            0
        }
    }

    pub fn covers(&self, day: Day) -> bool {
        self.day_from <= day && day <= self.day_to
    }

    /// Day on which the guest is expected to leave and be billed.
    pub fn checkout_day(&self) -> Day {
        self.day_to.saturating_add(1)
    }
}

/// Result of asking a policy to book a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allocation {
    /// Committed into the given room type (equal to or ranked after the requested one).
    Assigned(RoomType),
    Rejected,
}

impl Allocation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Allocation::Assigned(_))
    }

    pub fn assigned(&self) -> Option<RoomType> {
        match self {
            Allocation::Assigned(room_type) => Some(*room_type),
            Allocation::Rejected => None,
        }
    }

    pub fn is_upgrade_of(&self, requested: RoomType) -> bool {
        self.assigned().is_some_and(|assigned| assigned > requested)
    }
}

/// Lifecycle of one booking as seen from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingState {
    Booked,
    Rejected,
    CheckedIn,
    Missed,
    CheckedOut,
}

impl BookingState {
    pub fn after_booking(allocation: Allocation) -> Self {
        if allocation.is_accepted() {
            BookingState::Booked
        } else {
            BookingState::Rejected
        }
    }

    pub fn after_check_in(success: bool) -> Self {
        if success {
            BookingState::CheckedIn
        } else {
            BookingState::Missed
        }
    }

    /// No further event can follow this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingState::Rejected | BookingState::Missed | BookingState::CheckedOut
        )
    }
}
