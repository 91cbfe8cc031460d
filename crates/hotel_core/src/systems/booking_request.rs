use bevy_ecs::prelude::{Res, ResMut};
use tracing::{debug, error};

use crate::clock::CurrentTime;
use crate::demand::DemandGenerator;
use crate::ecs::{InventoryFault, StayQueues};
use crate::events::{HotelEvent, HotelEventLog};
use crate::policy::BookingPolicyResource;

/// Synthesizes at most one booking request per step once its scheduled time
/// has been reached, then schedules the next one whatever the outcome.
pub fn booking_request_system(
    now: Res<CurrentTime>,
    mut demand: ResMut<DemandGenerator>,
    mut policy: ResMut<BookingPolicyResource>,
    mut queues: ResMut<StayQueues>,
    mut log: ResMut<HotelEventLog>,
    mut fault: ResMut<InventoryFault>,
) {
    if !demand.should_book(now.0) {
        return;
    }

    let booking = demand.next_booking(now.0);
    match policy.book(&booking) {
        Ok(allocation) => {
            debug!(
                guest = %booking.guest,
                requested = %booking.room_type,
                day_from = booking.day_from,
                day_to = booking.day_to,
                ?allocation,
                "booking request"
            );
            if allocation.is_accepted() {
                queues.enqueue(booking);
            }
            log.push(HotelEvent::Booked {
                at: now.0,
                booking,
                allocation,
            });
        }
        Err(err) => {
            error!(guest = %booking.guest, error = %err, "inventory invariant violated");
            fault.0 = Some(err);
        }
    }

    demand.reschedule(now.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::Schedule;

    use crate::booking::Allocation;
    use crate::clock::SimTime;
    use crate::demand::DemandConfig;
    use crate::distributions::FixedInterval;
    use crate::test_helpers::{create_test_world, two_type_policy, two_type_catalog};

    fn run_at(hour: u32) -> bevy_ecs::prelude::World {
        let (policy, _clock) = two_type_policy([1, 1]);
        let now = SimTime::new(0, hour);
        let mut world = create_test_world(policy, now);
        let demand = DemandGenerator::new(
            DemandConfig::default()
                .with_inter_arrival(Box::new(FixedInterval::new(2)))
                .with_seed(11),
            &two_type_catalog(),
            SimTime::new(0, 0),
        )
        .unwrap();
        world.insert_resource(demand);

        let mut schedule = Schedule::default();
        schedule.add_systems(booking_request_system);
        schedule.run(&mut world);
        world
    }

    #[test]
    fn waits_for_scheduled_time() {
        let mut world = run_at(1);
        assert!(world.resource_mut::<HotelEventLog>().drain().is_empty());
        assert_eq!(world.resource::<DemandGenerator>().generated(), 0);
    }

    #[test]
    fn books_enqueues_and_reschedules() {
        let mut world = run_at(3);
        let events = world.resource_mut::<HotelEventLog>().drain();
        let [HotelEvent::Booked {
            booking,
            allocation,
            ..
        }] = events.as_slice()
        else {
            panic!("expected a single booking event, got {events:?}");
        };
        assert!(matches!(allocation, Allocation::Assigned(_)));
        assert!(booking.day_from >= 1);

        let queues = world.resource::<StayQueues>();
        assert_eq!(queues.pending_check_ins(), 1);
        assert_eq!(queues.pending_check_outs(), 1);
        assert_eq!(
            world.resource::<DemandGenerator>().next_booking_at(),
            SimTime::new(0, 5)
        );
        assert!(world.resource::<InventoryFault>().0.is_none());
    }
}
