//! Tracking state and the path/distance accumulator.

use jiff::Timestamp;

use crate::geo::distance_km;
use crate::model::{Coordinate, Event};

use super::EventLog;

/// Everything a session has accumulated so far.
///
/// The path is not stored; [`TrackingState::path`] derives it from the
/// log on demand, so it cannot drift from the location events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingState {
    pub last_accepted: Option<Coordinate>,
    pub total_distance_km: f64,
    pub paused: bool,
    pub log: EventLog,
}

impl TrackingState {
    /// Extends the route with an accepted fix.
    ///
    /// The first fix has nothing to measure from and adds no distance.
    pub fn accumulate(&mut self, coordinate: Coordinate, timestamp: Timestamp) {
        if let Some(last) = self.last_accepted {
            self.total_distance_km += distance_km(last, coordinate);
        }
        self.last_accepted = Some(coordinate);
        self.log.append(Event::Location {
            timestamp,
            coordinate,
        });
    }

    pub fn path(&self) -> Vec<Coordinate> {
        self.log.path().collect()
    }
}
