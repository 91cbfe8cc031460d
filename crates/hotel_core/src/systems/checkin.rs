use bevy_ecs::prelude::{Res, ResMut};
use tracing::{debug, warn};

use crate::clock::CurrentTime;
use crate::ecs::StayQueues;
use crate::events::{HotelEvent, HotelEventLog};
use crate::policy::BookingPolicyResource;

/// Validates every arrival due today against the ledger.
///
/// A guest who cannot check in has missed the stay; their check-out is
/// cancelled so no bill is ever produced for it.
pub fn checkin_system(
    now: Res<CurrentTime>,
    policy: Res<BookingPolicyResource>,
    mut queues: ResMut<StayQueues>,
    mut log: ResMut<HotelEventLog>,
) {
    for booking in queues.take_due_check_ins(now.0.day) {
        let success = policy.check_into(&booking);
        if success {
            debug!(guest = %booking.guest, "check-in");
        } else {
            warn!(
                guest = %booking.guest,
                day_from = booking.day_from,
                day_to = booking.day_to,
                today = now.0.day,
                "check-in refused, stay missed"
            );
            queues.cancel_check_out(&booking);
        }
        log.push(HotelEvent::CheckedIn {
            at: now.0,
            booking,
            success,
        });
    }
}
