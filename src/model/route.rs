//! Route summary: the unit of persistence and export.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::Event;

/// A named snapshot of a tracking session.
///
/// The path is deliberately absent: it is recomputed from `events`
/// whenever a summary is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub name: String,

    /// When the summary was saved.
    pub created_at: Timestamp,

    /// Timer value at save time, in whole seconds.
    pub elapsed: SignedDuration,

    pub total_distance_km: f64,

    pub events: Vec<Event>,
}
