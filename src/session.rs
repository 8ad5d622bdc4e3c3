//! Freezing live state into a route summary, and hydrating it back.
//!
//! Hydration never merges: the result replaces whatever session was
//! active. The path is always recomputed from the events.

use jiff::{SignedDuration, Timestamp};

use crate::model::{Event, RouteSummary};
use crate::tracking::{EventLog, TrackingState};

/// Errors that abandon a save.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a route needs a name")]
    MissingName,
}

/// Captures a session as a named summary.
///
/// `elapsed` is stored in whole seconds, as the timer shows it.
/// A blank name abandons the save.
pub fn freeze(
    name: &str,
    state: &TrackingState,
    elapsed: SignedDuration,
    created_at: Timestamp,
) -> Result<RouteSummary, SessionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::MissingName);
    }

    Ok(RouteSummary {
        name: name.to_string(),
        created_at,
        elapsed: SignedDuration::from_secs(elapsed.as_secs()),
        total_distance_km: state.total_distance_km,
        events: state.log.events().to_vec(),
    })
}

/// A session rebuilt from a stored summary or a shared link.
///
/// Shared links carry events only, so their metadata is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hydrated {
    pub name: Option<String>,
    pub created_at: Option<Timestamp>,
    pub elapsed: Option<SignedDuration>,
    pub total_distance_km: Option<f64>,
    pub state: TrackingState,
}

/// Rebuilds a session from a stored summary.
pub fn hydrate(summary: &RouteSummary) -> Hydrated {
    let mut state = rebuild(summary.events.clone());
    state.total_distance_km = summary.total_distance_km;

    Hydrated {
        name: Some(summary.name.clone()),
        created_at: Some(summary.created_at),
        elapsed: Some(summary.elapsed),
        total_distance_km: Some(summary.total_distance_km),
        state,
    }
}

/// Rebuilds a session from a bare event log, as received through a link.
pub fn hydrate_shared(events: Vec<Event>) -> Hydrated {
    Hydrated {
        name: None,
        created_at: None,
        elapsed: None,
        total_distance_km: None,
        state: rebuild(events),
    }
}

fn rebuild(events: Vec<Event>) -> TrackingState {
    let log = EventLog::from(events);
    TrackingState {
        last_accepted: log.path().last(),
        total_distance_km: 0.0,
        paused: false,
        log,
    }
}
