//! The demand simulator: a step-driven event loop over an ECS world.
//!
//! Each [HotelSimulator::advance] reads the shared clock once, publishes it as
//! [CurrentTime] and runs three chained systems: check-outs, then check-ins,
//! then at most one new booking request. The events emitted by those systems
//! are drained from [HotelEventLog] and handed back to the caller.

use std::sync::mpsc::Receiver;

use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use tracing::info;

use crate::clock::{CurrentTime, SharedClock, SimTime};
use crate::demand::{DemandConfig, DemandGenerator};
use crate::ecs::{InventoryFault, StayQueues};
use crate::error::{ConfigError, SimulationError};
use crate::events::{EventSubscribers, HotelEvent, HotelEventLog, HotelObserver};
use crate::inventory::RoomInventory;
use crate::policy::{BookingPolicy, BookingPolicyResource};
use crate::systems::{
    booking_request::booking_request_system, checkin::checkin_system, checkout::checkout_system,
};

/// Builds the per-step schedule. Systems run in order on one thread.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((checkout_system, checkin_system, booking_request_system).chain());
    schedule
}

pub struct HotelSimulator {
    world: World,
    schedule: Schedule,
    clock: SharedClock,
    subscribers: EventSubscribers,
    steps: u64,
}

impl HotelSimulator {
    /// The first booking request is scheduled one inter-arrival draw after
    /// the clock's current time.
    pub fn new(
        policy: Box<dyn BookingPolicy>,
        demand: DemandConfig,
        clock: SharedClock,
    ) -> Result<Self, ConfigError> {
        let now = clock.now();
        let generator = DemandGenerator::new(demand, policy.inventory().catalog(), now)?;
        info!(
            policy = %policy.kind(),
            room_types = policy.inventory().catalog().len(),
            total_rooms = policy.inventory().total_capacity(),
            start = %now,
            first_booking_at = %generator.next_booking_at(),
            mean_inter_arrival_hours = generator.config().inter_arrival.mean_hours(),
            "hotel simulator created"
        );

        let mut world = World::new();
        world.insert_resource(CurrentTime(now));
        world.insert_resource(BookingPolicyResource::new(policy));
        world.insert_resource(generator);
        world.insert_resource(StayQueues::default());
        world.insert_resource(HotelEventLog::default());
        world.insert_resource(InventoryFault::default());

        Ok(Self {
            world,
            schedule: simulation_schedule(),
            clock,
            subscribers: EventSubscribers::default(),
            steps: 0,
        })
    }

    /// Run one tick at the clock's current time.
    ///
    /// Events are returned in emission order and forwarded to every
    /// subscriber. An inventory invariant violation aborts the step with an
    /// error; the events emitted before it have already been published.
    pub fn advance(&mut self) -> Result<Vec<HotelEvent>, SimulationError> {
        let now = self.clock.now();
        self.world.insert_resource(CurrentTime(now));
        self.schedule.run(&mut self.world);
        self.steps += 1;

        let events = self.world.resource_mut::<HotelEventLog>().drain();
        self.subscribers.publish(&events);

        if let Some(err) = self.world.resource_mut::<InventoryFault>().0.take() {
            return Err(err.into());
        }
        Ok(events)
    }

    /// [Self::advance], then dispatch each event onto `observer`.
    pub fn advance_with<O: HotelObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<Vec<HotelEvent>, SimulationError> {
        let events = self.advance()?;
        for event in &events {
            event.dispatch(observer);
        }
        Ok(events)
    }

    pub fn subscribe(&mut self) -> Receiver<HotelEvent> {
        self.subscribers.subscribe()
    }

    pub fn policy(&self) -> &dyn BookingPolicy {
        self.world.resource::<BookingPolicyResource>().0.as_ref()
    }

    pub fn inventory(&self) -> &RoomInventory {
        self.policy().inventory()
    }

    pub fn demand(&self) -> &DemandGenerator {
        self.world.resource::<DemandGenerator>()
    }

    pub fn queues(&self) -> &StayQueues {
        self.world.resource::<StayQueues>()
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::booking::{Allocation, Booking};
    use crate::clock::{Clock, ManualClock};
    use crate::distributions::FixedInterval;
    use crate::error::InventoryError;
    use crate::room::{Cost, RoomType};
    use crate::events::HotelEventKind;
    use crate::test_helpers::{counts_of, two_type_catalog, two_type_policy, SINGLE_COST};

    fn one_booking_demand(gap_hours: u32) -> DemandConfig {
        DemandConfig::default()
            .with_inter_arrival(Box::new(FixedInterval::new(gap_hours)))
            .with_room_weights(vec![1.0, 0.0])
            .with_max_bookings(1)
            .with_seed(21)
    }

    #[test]
    fn booking_lifecycle_runs_to_check_out() {
        let (policy, clock) = two_type_policy([1, 1]);
        let mut sim = HotelSimulator::new(policy, one_booking_demand(2), clock.clone()).unwrap();
        let rx = sim.subscribe();

        assert!(sim.advance().unwrap().is_empty(), "nothing due at t=0");
        clock.advance_hours(2);
        let events = sim.advance().unwrap();
        let [HotelEvent::Booked {
            booking,
            allocation,
            ..
        }] = events.as_slice()
        else {
            panic!("expected booking, got {events:?}");
        };
        let booking = *booking;
        assert_eq!(*allocation, Allocation::Assigned(RoomType(0)));
        assert_eq!(booking.room_type, RoomType(0));

        let mut all = events.clone();
        let last_day = booking.checkout_day();
        while clock.now().day < last_day {
            clock.advance_hours(6);
            all.extend(sim.advance().unwrap());
        }

        let kinds: Vec<_> = all.iter().map(HotelEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                HotelEventKind::Booked,
                HotelEventKind::CheckedIn,
                HotelEventKind::CheckedOut
            ]
        );
        assert!(matches!(all[1], HotelEvent::CheckedIn { success: true, at, .. } if at.day == booking.day_from));
        assert!(matches!(all[2], HotelEvent::CheckedOut { cost: SINGLE_COST, at, .. } if at.day == last_day));

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received, all);
        assert_eq!(sim.queues().pending_check_ins(), 0);
        assert_eq!(sim.queues().pending_check_outs(), 0);
    }

    #[test]
    fn clock_jump_past_the_whole_stay_reports_a_miss_without_check_out() {
        let (policy, clock) = two_type_policy([1, 1]);
        let mut sim = HotelSimulator::new(policy, one_booking_demand(1), clock.clone()).unwrap();
        clock.advance_hours(1);
        let booked = sim.advance().unwrap();
        assert_eq!(booked.len(), 1);

        clock.advance_hours(24 * 40);
        let events = sim.advance().unwrap();
        assert!(matches!(
            events.as_slice(),
            [HotelEvent::CheckedIn { success: false, .. }]
        ));
        clock.advance_hours(24);
        assert!(sim.advance().unwrap().is_empty());
        assert_eq!(sim.queues().pending_check_outs(), 0);
    }

    #[test]
    fn observer_sees_dispatched_events() {
        #[derive(Default)]
        struct Count(usize);
        impl HotelObserver for Count {
            fn on_book(&mut self, _booking: &Booking, _allocation: Allocation) {
                self.0 += 1;
            }
        }

        let (policy, clock) = two_type_policy([1, 1]);
        let mut sim = HotelSimulator::new(policy, one_booking_demand(1), clock.clone()).unwrap();
        let mut observer = Count::default();
        clock.advance_hours(1);
        sim.advance_with(&mut observer).unwrap();
        assert_eq!(observer.0, 1);
        assert_eq!(sim.steps(), 1);
    }

    #[derive(Debug)]
    struct BrokenLedger {
        inventory: RoomInventory,
    }

    impl BookingPolicy for BrokenLedger {
        fn kind(&self) -> crate::policy::BookingPolicyKind {
            crate::policy::BookingPolicyKind::Trivial
        }

        fn book(&mut self, _booking: &Booking) -> Result<Allocation, InventoryError> {
            Err(InventoryError::CapacityExceeded {
                room_type: "Single".to_string(),
                day: 1,
                capacity: 0,
            })
        }

        fn check_into(&self, _booking: &Booking) -> bool {
            false
        }

        fn bill(&self, _booking: &Booking) -> Cost {
            0
        }

        fn inventory(&self) -> &RoomInventory {
            &self.inventory
        }
    }

    #[test]
    fn invariant_violation_surfaces_as_error() {
        let catalog = Arc::new(two_type_catalog());
        let inventory = RoomInventory::new(catalog, &counts_of(&[1, 1])).unwrap();
        let clock = Arc::new(ManualClock::new());
        let mut sim = HotelSimulator::new(
            Box::new(BrokenLedger { inventory }),
            one_booking_demand(1),
            clock.clone(),
        )
        .unwrap();
        let rx = sim.subscribe();

        clock.advance_hours(1);
        let err = sim.advance().unwrap_err();
        assert!(matches!(err, SimulationError::Inventory(InventoryError::CapacityExceeded { .. })));
        assert!(rx.try_recv().is_err(), "faulted request emits no event");
        assert_eq!(sim.queues().pending_check_ins(), 0);
    }
}
