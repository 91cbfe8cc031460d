//! Simulator state held as ECS resources.

use std::collections::{BTreeMap, HashSet};

use bevy_ecs::prelude::Resource;

use crate::booking::{Booking, GuestId};
use crate::clock::Day;
use crate::error::InventoryError;

/// Accepted stays waiting for their arrival day and their departure day.
///
/// Check-ins are keyed by `day_from`, check-outs by `day_to + 1`.
#[derive(Debug, Default, Resource)]
pub struct StayQueues {
    check_ins: BTreeMap<Day, Vec<Booking>>,
    check_outs: BTreeMap<Day, Vec<Booking>>,
    awaiting_arrival: HashSet<GuestId>,
}

impl StayQueues {
    pub fn enqueue(&mut self, booking: Booking) {
        self.check_ins
            .entry(booking.day_from)
            .or_default()
            .push(booking);
        self.check_outs
            .entry(booking.checkout_day())
            .or_default()
            .push(booking);
        self.awaiting_arrival.insert(booking.guest);
    }

    /// Remove and return every check-in due on or before `today`, oldest day first.
    pub fn take_due_check_ins(&mut self, today: Day) -> Vec<Booking> {
        let due = drain_through(&mut self.check_ins, today);
        for booking in &due {
            self.awaiting_arrival.remove(&booking.guest);
        }
        due
    }

    /// Remove and return every check-out due on or before `today`.
    ///
    /// A stay whose check-in has not been processed yet stays queued: after a
    /// clock jump its arrival is still pending and decides whether a check-out
    /// happens at all.
    pub fn take_due_check_outs(&mut self, today: Day) -> Vec<Booking> {
        let (waiting, due): (Vec<_>, Vec<_>) = drain_through(&mut self.check_outs, today)
            .into_iter()
            .partition(|booking| self.awaiting_arrival.contains(&booking.guest));
        for booking in waiting {
            self.check_outs
                .entry(booking.checkout_day())
                .or_default()
                .push(booking);
        }
        due
    }

    /// Drop the pending check-out of a guest who failed to check in.
    pub fn cancel_check_out(&mut self, booking: &Booking) -> bool {
        let day = booking.checkout_day();
        let Some(queue) = self.check_outs.get_mut(&day) else {
            return false;
        };
        let before = queue.len();
        queue.retain(|queued| queued.guest != booking.guest);
        let removed = queue.len() != before;
        if queue.is_empty() {
            self.check_outs.remove(&day);
        }
        removed
    }

    pub fn pending_check_ins(&self) -> usize {
        self.check_ins.values().map(Vec::len).sum()
    }

    pub fn pending_check_outs(&self) -> usize {
        self.check_outs.values().map(Vec::len).sum()
    }
}

fn drain_through(queue: &mut BTreeMap<Day, Vec<Booking>>, today: Day) -> Vec<Booking> {
    let mut due = Vec::new();
    while let Some(entry) = queue.first_entry() {
        if *entry.key() > today {
            break;
        }
        due.extend(entry.remove());
    }
    due
}

/// Set when a booking hit an inventory invariant violation during the step.
#[derive(Debug, Default, Resource)]
pub struct InventoryFault(pub Option<InventoryError>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomType;

    fn stay(guest: u64, from: Day, to: Day) -> Booking {
        Booking::new(GuestId(guest), RoomType(0), from, to)
    }

    #[test]
    fn check_ins_drain_in_day_order() {
        let mut queues = StayQueues::default();
        queues.enqueue(stay(1, 4, 5));
        queues.enqueue(stay(2, 2, 3));
        queues.enqueue(stay(3, 9, 9));

        assert!(queues.take_due_check_ins(1).is_empty());
        let due: Vec<_> = queues
            .take_due_check_ins(5)
            .iter()
            .map(|b| b.guest.0)
            .collect();
        assert_eq!(due, vec![2, 1]);
        assert_eq!(queues.pending_check_ins(), 1);
    }

    #[test]
    fn check_out_waits_for_pending_arrival() {
        let mut queues = StayQueues::default();
        queues.enqueue(stay(1, 2, 3));

        assert!(queues.take_due_check_outs(6).is_empty());
        assert_eq!(queues.pending_check_outs(), 1);

        queues.take_due_check_ins(2);
        let due = queues.take_due_check_outs(4);
        assert_eq!(due, vec![stay(1, 2, 3)]);
        assert_eq!(queues.pending_check_outs(), 0);
    }

    #[test]
    fn cancel_removes_only_that_guest() {
        let mut queues = StayQueues::default();
        queues.enqueue(stay(1, 2, 3));
        queues.enqueue(stay(2, 1, 3));

        assert!(queues.cancel_check_out(&stay(1, 2, 3)));
        assert!(!queues.cancel_check_out(&stay(1, 2, 3)));
        assert_eq!(queues.pending_check_outs(), 1);
    }
}
