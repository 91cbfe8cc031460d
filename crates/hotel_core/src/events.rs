//! Events emitted by the simulator and the observer interface that consumes them.
//!
//! Delivery is decoupled from engine lifetime: events are returned from each
//! step, pushed into channels handed out by
//! [crate::simulation::HotelSimulator::subscribe], and can be replayed onto
//! any [HotelObserver] with [HotelEvent::dispatch].

use std::sync::mpsc::{self, Receiver, Sender};

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::booking::{Allocation, Booking};
use crate::clock::SimTime;
use crate::room::Cost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HotelEventKind {
    Booked,
    CheckedIn,
    CheckedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HotelEvent {
    Booked {
        at: SimTime,
        booking: Booking,
        allocation: Allocation,
    },
    CheckedIn {
        at: SimTime,
        booking: Booking,
        success: bool,
    },
    CheckedOut {
        at: SimTime,
        booking: Booking,
        cost: Cost,
    },
}

impl HotelEvent {
    pub fn kind(&self) -> HotelEventKind {
        match self {
            HotelEvent::Booked { .. } => HotelEventKind::Booked,
            HotelEvent::CheckedIn { .. } => HotelEventKind::CheckedIn,
            HotelEvent::CheckedOut { .. } => HotelEventKind::CheckedOut,
        }
    }

    pub fn booking(&self) -> &Booking {
        match self {
            HotelEvent::Booked { booking, .. }
            | HotelEvent::CheckedIn { booking, .. }
            | HotelEvent::CheckedOut { booking, .. } => booking,
        }
    }

    pub fn at(&self) -> SimTime {
        match self {
            HotelEvent::Booked { at, .. }
            | HotelEvent::CheckedIn { at, .. }
            | HotelEvent::CheckedOut { at, .. } => *at,
        }
    }

    pub fn dispatch<O: HotelObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            HotelEvent::Booked {
                booking,
                allocation,
                ..
            } => observer.on_book(booking, *allocation),
            HotelEvent::CheckedIn {
                booking, success, ..
            } => observer.on_check_in(booking, *success),
            HotelEvent::CheckedOut { booking, cost, .. } => observer.on_check_out(booking, *cost),
        }
    }
}

/// Receives simulator notifications. Every method defaults to a no-op so
/// observers only implement what they care about.
pub trait HotelObserver {
    fn on_book(&mut self, _booking: &Booking, _allocation: Allocation) {}

    fn on_check_in(&mut self, _booking: &Booking, _success: bool) {}

    fn on_check_out(&mut self, _booking: &Booking, _cost: Cost) {}
}

/// Events emitted during the current step, in emission order.
#[derive(Debug, Default, Resource)]
pub struct HotelEventLog(pub Vec<HotelEvent>);

impl HotelEventLog {
    pub fn push(&mut self, event: HotelEvent) {
        self.0.push(event);
    }

    pub fn drain(&mut self) -> Vec<HotelEvent> {
        std::mem::take(&mut self.0)
    }
}

/// Channel fan-out. Subscribers whose receiver was dropped are pruned on the
/// next publish.
#[derive(Debug, Default)]
pub struct EventSubscribers {
    senders: Vec<Sender<HotelEvent>>,
}

impl EventSubscribers {
    pub fn subscribe(&mut self) -> Receiver<HotelEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    pub fn publish(&mut self, events: &[HotelEvent]) {
        if events.is_empty() {
            return;
        }
        self.senders
            .retain(|tx| events.iter().all(|event| tx.send(*event).is_ok()));
    }
}
