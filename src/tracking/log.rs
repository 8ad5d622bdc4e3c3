//! Event log: the ordered, append-only record of a session.

use crate::model::{Coordinate, Event, EventKind};

/// Every event of a session, in the order it was appended.
///
/// Never sorted, never deduplicated. Consumers render in log order even
/// when a late annotation carries an earlier timestamp than its neighbours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events of one kind, in log order.
    ///
    /// The view borrows the log and can be cloned to walk it again.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> + Clone {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    /// The path: one coordinate per location event, in log order.
    pub fn path(&self) -> impl Iterator<Item = Coordinate> + Clone {
        self.of_kind(EventKind::Location).map(Event::coordinate)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}
