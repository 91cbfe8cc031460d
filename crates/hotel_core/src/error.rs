use thiserror::Error;

use crate::clock::Day;

/// Fatal configuration problems, raised before any simulation step runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("room catalog is empty")]
    EmptyCatalog,

    #[error("room type '{0}' is declared more than once")]
    DuplicateRoomType(String),

    #[error("at most {0} room types are supported")]
    TooManyRoomTypes(usize),

    #[error("unknown room type '{0}'")]
    UnknownRoomType(String),

    #[error("room type rank {0} is not in the catalog")]
    UnknownRoomRank(u8),

    #[error("room count is not set for room type '{0}'")]
    MissingRoomCount(String),

    #[error("room cost is not set for room type '{0}'")]
    MissingRoomCost(String),

    #[error("invalid {what} range: [{min}, {max}]")]
    InvalidRange {
        what: &'static str,
        min: u32,
        max: u32,
    },

    #[error("inter-arrival rate must be positive and finite, got {0}")]
    InvalidRate(f64),

    #[error("invalid room type weights: {0}")]
    InvalidWeights(String),

    #[error("failed to parse hotel parameters: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Ledger invariant violations. Reaching one of these is a defect in the caller,
/// never an ordinary booking rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("all {capacity} rooms of type '{room_type}' are busy on day {day}")]
    CapacityExceeded {
        room_type: String,
        day: Day,
        capacity: u32,
    },

    #[error("stay [{day_from}, {day_to}] covers no days")]
    EmptyStay { day_from: Day, day_to: Day },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("booking engine invariant violated: {0}")]
    Inventory(#[from] InventoryError),
}
