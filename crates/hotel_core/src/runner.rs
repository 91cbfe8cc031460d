//! External driver: moves a [ManualClock] and steps the simulator.
//!
//! Clock progression and day-rollover sampling happen here, outside the
//! simulator. Each step advances the simulator at the current time, feeds the
//! emitted events to [HotelTelemetry], then moves the clock forward.

use std::sync::Arc;

use tracing::info;

use crate::clock::{Clock, Day, ManualClock, SimTime};
use crate::demand::DemandConfig;
use crate::error::{ConfigError, SimulationError};
use crate::events::HotelEvent;
use crate::policy::BookingPolicy;
use crate::simulation::HotelSimulator;
use crate::telemetry::HotelTelemetry;

pub struct HotelRunner {
    clock: Arc<ManualClock>,
    simulator: HotelSimulator,
    telemetry: HotelTelemetry,
    last_sampled_day: Day,
}

impl HotelRunner {
    /// The policy must read the same `clock`. The starting day is sampled
    /// immediately.
    pub fn new(
        policy: Box<dyn BookingPolicy>,
        demand: DemandConfig,
        clock: Arc<ManualClock>,
    ) -> Result<Self, ConfigError> {
        let simulator = HotelSimulator::new(policy, demand, clock.clone())?;
        let start_day = clock.now().day;
        let mut telemetry = HotelTelemetry::new();
        telemetry.record_day(start_day, simulator.inventory());
        Ok(Self {
            clock,
            simulator,
            telemetry,
            last_sampled_day: start_day,
        })
    }

    /// Run one tick, then move the clock by `hours`. Every day entered by the
    /// move is sampled, including days skipped over by a large step.
    pub fn step(&mut self, hours: u32) -> Result<Vec<HotelEvent>, SimulationError> {
        let events = self.simulator.advance()?;
        self.telemetry.record_events(&events);

        let now = self.clock.advance_hours(hours);
        while self.last_sampled_day < now.day {
            self.last_sampled_day += 1;
            self.telemetry
                .record_day(self.last_sampled_day, self.simulator.inventory());
            info!(
                day = self.last_sampled_day,
                accepted = self.telemetry.accepted_bookings(),
                rejected = self.telemetry.rejected_bookings(),
                revenue = self.telemetry.revenue(),
                "day started"
            );
        }
        Ok(events)
    }

    /// Step in increments of `step_hours` until `days` more days have begun.
    /// Returns the number of steps executed.
    pub fn run_for_days(&mut self, days: u32, step_hours: u32) -> Result<usize, SimulationError> {
        self.run_for_days_with_hook(days, step_hours, |_, _| {})
    }

    /// [Self::run_for_days], invoking `hook` after every step.
    pub fn run_for_days_with_hook<F>(
        &mut self,
        days: u32,
        step_hours: u32,
        mut hook: F,
    ) -> Result<usize, SimulationError>
    where
        F: FnMut(&HotelSimulator, &[HotelEvent]),
    {
        let step_hours = step_hours.max(1);
        let target = self.clock.now().day.saturating_add(days);
        let mut steps = 0;
        while self.clock.now().day < target {
            let events = self.step(step_hours)?;
            hook(&self.simulator, &events);
            steps += 1;
        }
        Ok(steps)
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn clock(&self) -> &Arc<ManualClock> {
        &self.clock
    }

    pub fn simulator(&self) -> &HotelSimulator {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut HotelSimulator {
        &mut self.simulator
    }

    pub fn telemetry(&self) -> &HotelTelemetry {
        &self.telemetry
    }

    pub fn into_telemetry(self) -> HotelTelemetry {
        self.telemetry
    }
}
