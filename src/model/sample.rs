//! Sample: one raw reading from a position source.

use jiff::Timestamp;

use super::Coordinate;

/// A raw position fix as delivered by the device.
///
/// Never persisted. Only an accepted sample survives, as a location event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub coordinate: Coordinate,

    /// Horizontal accuracy radius in meters.
    pub accuracy: f64,

    pub timestamp: Timestamp,
}
