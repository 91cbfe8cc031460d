//! Room types as an ordered registry.
//!
//! The catalog order is the upgrade direction: a type ranked later is an
//! acceptable substitute for any type ranked before it, never the reverse.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Price of one stay.
pub type Cost = u64;

/// Rank of a room type inside its [RoomCatalog].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomType(pub u8);

impl RoomType {
    pub fn rank(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type RoomCounts = BTreeMap<RoomType, u32>;
pub type RoomCosts = BTreeMap<RoomType, Cost>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTypeDescriptor {
    pub room_type: RoomType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalog {
    descriptors: Vec<RoomTypeDescriptor>,
}

impl RoomCatalog {
    pub const STANDARD_NAMES: [&'static str; 5] =
        ["Single", "Double", "DoubleWithSofa", "HalfLux", "Lux"];

    /// Build a catalog from names in upgrade order (cheapest first).
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut descriptors: Vec<RoomTypeDescriptor> = Vec::new();
        for name in names {
            let name = name.into();
            if descriptors
                .iter()
                .any(|d| d.name.eq_ignore_ascii_case(&name))
            {
                return Err(ConfigError::DuplicateRoomType(name));
            }
            if descriptors.len() > u8::MAX as usize {
                return Err(ConfigError::TooManyRoomTypes(u8::MAX as usize + 1));
            }
            descriptors.push(RoomTypeDescriptor {
                room_type: RoomType(descriptors.len() as u8),
                name,
            });
        }
        if descriptors.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { descriptors })
    }

    pub fn standard() -> Self {
        Self {
            descriptors: Self::STANDARD_NAMES
                .iter()
                .enumerate()
                .map(|(i, name)| RoomTypeDescriptor {
                    room_type: RoomType(i as u8),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn contains(&self, room_type: RoomType) -> bool {
        room_type.rank() < self.descriptors.len()
    }

    pub fn types(&self) -> impl Iterator<Item = RoomType> + '_ {
        self.descriptors.iter().map(|d| d.room_type)
    }

    pub fn descriptors(&self) -> &[RoomTypeDescriptor] {
        &self.descriptors
    }

    pub fn name(&self, room_type: RoomType) -> &str {
        self.descriptors
            .get(room_type.rank())
            .map(|d| d.name.as_str())
            .unwrap_or("unknown")
    }

    pub fn lookup(&self, name: &str) -> Option<RoomType> {
        self.descriptors
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.room_type)
    }

    /// The requested type followed by every type ranked after it.
    pub fn suitable_for(&self, requested: RoomType) -> impl Iterator<Item = RoomType> + '_ {
        self.descriptors
            .iter()
            .skip(requested.rank())
            .map(|d| d.room_type)
    }

    /// Convert a name-keyed table into a type-keyed one. Unknown names are rejected;
    /// completeness is checked by the consumer of the table.
    pub fn resolve_names<T: Copy>(
        &self,
        by_name: &BTreeMap<String, T>,
    ) -> Result<BTreeMap<RoomType, T>, ConfigError> {
        by_name
            .iter()
            .map(|(name, value)| {
                self.lookup(name)
                    .map(|room_type| (room_type, *value))
                    .ok_or_else(|| ConfigError::UnknownRoomType(name.clone()))
            })
            .collect()
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
