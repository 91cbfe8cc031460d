//! Simulated time: `(day, hour)` pairs and the clocks that produce them.
//!
//! Components never look time up through global state. They receive a
//! [SharedClock] at construction and only ever read it; the external driver is
//! the only party that moves a clock forward.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

pub const HOURS_IN_DAY: u32 = 24;

/// Simulation day index. Day 0 is the day the clock started on.
pub type Day = u32;

/// A point in simulated time. Ordered by day, then hour.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime {
    pub day: Day,
    pub hour: u32,
}

impl SimTime {
    pub fn new(day: Day, hour: u32) -> Self {
        debug_assert!(hour < HOURS_IN_DAY, "hour must be < 24");
        Self { day, hour }
    }

    pub fn from_hours(hours: u64) -> Self {
        Self {
            day: (hours / HOURS_IN_DAY as u64) as Day,
            hour: (hours % HOURS_IN_DAY as u64) as u32,
        }
    }

    pub fn as_hours(&self) -> u64 {
        self.day as u64 * HOURS_IN_DAY as u64 + self.hour as u64
    }

    pub fn plus_hours(&self, hours: u32) -> Self {
        Self::from_hours(self.as_hours() + hours as u64)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {:02}:00", self.day, self.hour)
    }
}

/// Source of the current simulated time. Must be non-decreasing across calls.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> SimTime;
}

pub type SharedClock = Arc<dyn Clock>;

/// Manually advanced clock: an hour counter moved by the driver between steps.
#[derive(Debug, Default)]
pub struct ManualClock {
    hours: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(time: SimTime) -> Self {
        Self {
            hours: AtomicU64::new(time.as_hours()),
        }
    }

    pub fn advance_hours(&self, hours: u32) -> SimTime {
        let total = self.hours.fetch_add(hours as u64, Ordering::SeqCst) + hours as u64;
        SimTime::from_hours(total)
    }

    /// Jump to `time`. Moving backwards is refused and returns `false`.
    pub fn set(&self, time: SimTime) -> bool {
        let target = time.as_hours();
        self.hours
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                (target >= current).then_some(target)
            })
            .is_ok()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SimTime {
        SimTime::from_hours(self.hours.load(Ordering::SeqCst))
    }
}

/// Wall-clock derived time: every `real_per_hour` of real time is one simulated hour.
#[derive(Debug)]
pub struct WallClock {
    started: Instant,
    real_per_hour: Duration,
}

impl WallClock {
    pub fn new(real_per_hour: Duration) -> Self {
        Self {
            started: Instant::now(),
            real_per_hour: real_per_hour.max(Duration::from_millis(1)),
        }
    }

    /// One simulated day per real day.
    pub fn real_time() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}

impl Clock for WallClock {
    fn now(&self) -> SimTime {
        let elapsed = self.started.elapsed().as_nanos();
        let hours = elapsed / self.real_per_hour.as_nanos();
        SimTime::from_hours(hours as u64)
    }
}

/// Time observed at the start of the current simulator step.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct CurrentTime(pub SimTime);
