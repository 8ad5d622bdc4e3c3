//! Core data model for fieldtrack.
//!
//! These types are what the tracking pipeline produces and persists:
//! coordinates, raw samples, logged events, and saved route summaries.

mod coordinate;
mod event;
mod route;
mod sample;

pub use coordinate::Coordinate;
pub use event::{Event, EventKind, MediaKind};
pub use route::RouteSummary;
pub use sample::Sample;
