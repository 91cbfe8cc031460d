pub mod algorithm;
pub mod front_desk;
pub mod smart;
pub mod trivial;

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::SharedClock;
use crate::error::ConfigError;
use crate::room::{RoomCatalog, RoomCosts, RoomCounts};

pub use algorithm::BookingPolicy;
pub use front_desk::FrontDesk;
pub use smart::SmartBooking;
pub use trivial::TrivialBooking;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPolicyKind {
    Trivial,
    #[default]
    Smart,
}

impl BookingPolicyKind {
    pub const ALL: [BookingPolicyKind; 2] = [BookingPolicyKind::Trivial, BookingPolicyKind::Smart];
}

impl fmt::Display for BookingPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingPolicyKind::Trivial => f.write_str("trivial"),
            BookingPolicyKind::Smart => f.write_str("smart"),
        }
    }
}

/// Build a boxed policy of the given kind over a fresh inventory.
pub fn create_policy(
    kind: BookingPolicyKind,
    catalog: Arc<RoomCatalog>,
    counts: &RoomCounts,
    costs: &RoomCosts,
    clock: SharedClock,
) -> Result<Box<dyn BookingPolicy>, ConfigError> {
    Ok(match kind {
        BookingPolicyKind::Trivial => {
            Box::new(TrivialBooking::new(catalog, counts, costs, clock)?)
        }
        BookingPolicyKind::Smart => Box::new(SmartBooking::new(catalog, counts, costs, clock)?),
    })
}

/// Resource wrapper for the booking policy trait object.
#[derive(Resource)]
pub struct BookingPolicyResource(pub Box<dyn BookingPolicy>);

impl BookingPolicyResource {
    pub fn new(policy: Box<dyn BookingPolicy>) -> Self {
        Self(policy)
    }
}

impl std::ops::Deref for BookingPolicyResource {
    type Target = dyn BookingPolicy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for BookingPolicyResource {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
