use bevy_ecs::prelude::{Res, ResMut};
use tracing::debug;

use crate::clock::CurrentTime;
use crate::ecs::StayQueues;
use crate::events::{HotelEvent, HotelEventLog};
use crate::policy::BookingPolicyResource;

/// Bills every stay whose departure day has arrived.
pub fn checkout_system(
    now: Res<CurrentTime>,
    policy: Res<BookingPolicyResource>,
    mut queues: ResMut<StayQueues>,
    mut log: ResMut<HotelEventLog>,
) {
    for booking in queues.take_due_check_outs(now.0.day) {
        let cost = policy.bill(&booking);
        debug!(guest = %booking.guest, cost, "check-out");
        log.push(HotelEvent::CheckedOut {
            at: now.0,
            booking,
            cost,
        });
    }
}
