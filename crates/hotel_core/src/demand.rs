//! Demand generation: synthesizes booking requests on a stochastic schedule.
//!
//! The generator owns the guest id counter and the time of the next request.
//! It is driven by [crate::systems::booking_request::booking_request_system],
//! which asks [DemandGenerator::should_book] once per tick.

use bevy_ecs::prelude::Resource;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::booking::{Booking, GuestId};
use crate::clock::SimTime;
use crate::distributions::{InterArrivalDistribution, UniformHours};
use crate::error::ConfigError;
use crate::room::{RoomCatalog, RoomType};

/// Longest configurable lead time or stay, in days.
pub const MAX_DAY_SPAN: u32 = 365;

/// Inclusive day range for a uniform draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub min: u32,
    pub max: u32,
}

impl DayRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn validate(self, what: &'static str, lowest: u32) -> Result<Self, ConfigError> {
        if self.min < lowest || self.max < self.min || self.max > MAX_DAY_SPAN {
            return Err(ConfigError::InvalidRange {
                what,
                min: self.min,
                max: self.max,
            });
        }
        Ok(self)
    }

    fn sample(self, rng: &mut StdRng) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Configuration for the demand generator.
#[derive(Debug)]
pub struct DemandConfig {
    pub inter_arrival: Box<dyn InterArrivalDistribution>,
    /// Days between the request and the first night of the stay.
    pub lead_days: DayRange,
    /// Number of nights; `day_to = day_from + nights - 1`.
    pub stay_days: DayRange,
    /// One weight per catalog entry, in catalog order. Empty means
    /// [DemandConfig::default_weights].
    pub room_weights: Vec<f64>,
    pub max_bookings: Option<u64>,
    /// Fixed seed for reproducible runs; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            inter_arrival: Box::new(UniformHours::default()),
            lead_days: DayRange::new(1, 10),
            stay_days: DayRange::new(1, 10),
            room_weights: Vec::new(),
            max_bookings: None,
            seed: None,
        }
    }
}

impl DemandConfig {
    /// Linearly decreasing weights: the cheapest type is requested most often.
    pub fn default_weights(type_count: usize) -> Vec<f64> {
        (1..=type_count).rev().map(|w| w as f64).collect()
    }

    pub fn with_inter_arrival(mut self, dist: Box<dyn InterArrivalDistribution>) -> Self {
        self.inter_arrival = dist;
        self
    }

    pub fn with_lead_days(mut self, min: u32, max: u32) -> Self {
        self.lead_days = DayRange::new(min, max);
        self
    }

    pub fn with_stay_days(mut self, min: u32, max: u32) -> Self {
        self.stay_days = DayRange::new(min, max);
        self
    }

    pub fn with_room_weights(mut self, weights: Vec<f64>) -> Self {
        self.room_weights = weights;
        self
    }

    pub fn with_max_bookings(mut self, max: u64) -> Self {
        self.max_bookings = Some(max);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Resource)]
pub struct DemandGenerator {
    config: DemandConfig,
    room_types: Vec<RoomType>,
    weights: WeightedIndex<f64>,
    rng: StdRng,
    next_guest: u64,
    next_booking_at: SimTime,
    generated: u64,
}

impl DemandGenerator {
    /// Validates the configuration against `catalog` and schedules the first
    /// request one inter-arrival draw after `start`.
    pub fn new(
        config: DemandConfig,
        catalog: &RoomCatalog,
        start: SimTime,
    ) -> Result<Self, ConfigError> {
        config.lead_days.validate("lead days", 0)?;
        config.stay_days.validate("stay days", 1)?;

        let raw_weights = if config.room_weights.is_empty() {
            DemandConfig::default_weights(catalog.len())
        } else {
            config.room_weights.clone()
        };
        if raw_weights.len() != catalog.len() {
            return Err(ConfigError::InvalidWeights(format!(
                "expected {} room weights, got {}",
                catalog.len(),
                raw_weights.len()
            )));
        }
        if let Some(bad) = raw_weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ConfigError::InvalidWeights(format!(
                "weights must be finite and non-negative, got {bad}"
            )));
        }
        let total: f64 = raw_weights.iter().sum();
        if !total.is_finite() {
            return Err(ConfigError::InvalidWeights(format!(
                "weights must sum to a finite value, got {total}"
            )));
        }
        let weights = WeightedIndex::new(&raw_weights)
            .map_err(|err| ConfigError::InvalidWeights(err.to_string()))?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let first_gap = config.inter_arrival.sample_hours(&mut rng);

        Ok(Self {
            room_types: catalog.types().collect(),
            weights,
            rng,
            next_guest: 1,
            next_booking_at: start.plus_hours(first_gap),
            generated: 0,
            config,
        })
    }

    pub fn config(&self) -> &DemandConfig {
        &self.config
    }

    pub fn next_booking_at(&self) -> SimTime {
        self.next_booking_at
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn is_exhausted(&self) -> bool {
        self.config
            .max_bookings
            .is_some_and(|max| self.generated >= max)
    }

    pub fn should_book(&self, now: SimTime) -> bool {
        !self.is_exhausted() && now >= self.next_booking_at
    }

    /// Draw a new request for a guest arriving `lead_days` after `now`.
    pub fn next_booking(&mut self, now: SimTime) -> Booking {
        let guest = GuestId(self.next_guest);
        self.next_guest += 1;
        self.generated += 1;

        let day_from = now
            .day
            .saturating_add(self.config.lead_days.sample(&mut self.rng));
        let nights = self.config.stay_days.sample(&mut self.rng);
        let day_to = day_from.saturating_add(nights - 1);
        let room_type = self.room_types[self.weights.sample(&mut self.rng)];
        Booking::new(guest, room_type, day_from, day_to)
    }

    /// Schedule the next request one inter-arrival draw after `now`.
    pub fn reschedule(&mut self, now: SimTime) -> SimTime {
        let gap = self.config.inter_arrival.sample_hours(&mut self.rng);
        self.next_booking_at = now.plus_hours(gap);
        self.next_booking_at
    }
}
