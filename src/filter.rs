//! Sample filtering: drop GPS noise before it reaches the path.
//!
//! Rules apply in order and the first failing rule decides:
//!
//! 1. accuracy worse than `max_accuracy_m`
//! 2. a jump of more than `max_jump_km` from the last accepted point
//! 3. the session is paused
//!
//! A rejected sample is dropped for good. Nothing retries it.

use crate::geo::distance_km;
use crate::model::{Coordinate, Sample};

/// Default accuracy ceiling, in meters.
pub const DEFAULT_MAX_ACCURACY_M: f64 = 25.0;

/// Default ceiling on the distance between consecutive accepted fixes, in km.
pub const DEFAULT_MAX_JUMP_KM: f64 = 0.2;

/// Thresholds applied to incoming samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleFilter {
    pub max_accuracy_m: f64,
    pub max_jump_km: f64,
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self {
            max_accuracy_m: DEFAULT_MAX_ACCURACY_M,
            max_jump_km: DEFAULT_MAX_JUMP_KM,
        }
    }
}

/// The outcome of offering a sample to the filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Accepted,

    /// The fix reported an accuracy radius above the ceiling.
    LowAccuracy { accuracy_m: f64 },

    /// The fix landed too far from the last accepted point.
    ImplausibleJump { distance_km: f64 },

    /// Tracking is paused; every sample is dropped.
    Paused,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl SampleFilter {
    /// Decide whether `sample` may extend the path.
    ///
    /// The jump check measures against `last_accepted` even across a
    /// pause, so the first fix after a long pause may be rejected.
    pub fn check(
        &self,
        sample: &Sample,
        last_accepted: Option<Coordinate>,
        paused: bool,
    ) -> Verdict {
        if sample.accuracy > self.max_accuracy_m {
            return Verdict::LowAccuracy {
                accuracy_m: sample.accuracy,
            };
        }

        if let Some(last) = last_accepted {
            let jump = distance_km(last, sample.coordinate);
            if jump > self.max_jump_km {
                return Verdict::ImplausibleJump { distance_km: jump };
            }
        }

        if paused {
            return Verdict::Paused;
        }

        Verdict::Accepted
    }
}
