//! Coordinate: a point on the globe in degrees.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// Out-of-range values are carried as-is; nothing here validates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
