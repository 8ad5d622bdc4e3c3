//! The live tracking pipeline.
//!
//! A [`TrackingSession`] owns everything that changes while a route is
//! being recorded: the filter thresholds, the accumulated state, and the
//! elapsed-time stopwatch. Every method runs to completion, so one
//! incoming sample is one atomic step: filter, accumulate, append.

mod log;
mod state;
mod stopwatch;

use jiff::{SignedDuration, Timestamp};

use crate::filter::{SampleFilter, Verdict};
use crate::model::{Coordinate, Event, Sample};

pub use log::EventLog;
pub use state::TrackingState;
pub use stopwatch::Stopwatch;

/// An active recording.
#[derive(Debug)]
pub struct TrackingSession {
    filter: SampleFilter,
    state: TrackingState,
    stopwatch: Stopwatch,
}

impl TrackingSession {
    /// Starts a fresh session with an empty log and a running timer.
    pub fn start(filter: SampleFilter, now: Timestamp) -> Self {
        let mut stopwatch = Stopwatch::default();
        stopwatch.resume(now);
        Self {
            filter,
            state: TrackingState::default(),
            stopwatch,
        }
    }

    /// Offers a raw sample to the pipeline.
    ///
    /// Accepted samples extend the path and the log; anything else is
    /// dropped silently and reported only through the returned verdict.
    pub fn offer(&mut self, sample: &Sample) -> Verdict {
        let verdict = self
            .filter
            .check(sample, self.state.last_accepted, self.state.paused);
        match verdict {
            Verdict::Accepted => {
                self.state.accumulate(sample.coordinate, sample.timestamp);
            }
            Verdict::LowAccuracy { accuracy_m } => {
                tracing::debug!(accuracy_m, "dropped low-accuracy sample");
            }
            Verdict::ImplausibleJump { distance_km } => {
                tracing::debug!(distance_km, "dropped implausible jump");
            }
            Verdict::Paused => {
                tracing::debug!("dropped sample while paused");
            }
        }
        verdict
    }

    /// Flips the pause flag. Returns the new value.
    ///
    /// The last accepted point is kept across the pause.
    pub fn toggle_pause(&mut self, now: Timestamp) -> bool {
        self.state.paused = !self.state.paused;
        if self.state.paused {
            self.stopwatch.pause(now);
        } else {
            self.stopwatch.resume(now);
        }
        self.state.paused
    }

    /// Appends an annotation captured elsewhere.
    ///
    /// Annotations bypass the filter; they land even while paused.
    pub fn annotate(&mut self, event: Event) {
        self.state.log.append(event);
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn path(&self) -> Vec<Coordinate> {
        self.state.path()
    }

    pub fn elapsed(&self, now: Timestamp) -> SignedDuration {
        self.stopwatch.elapsed(now)
    }

    /// Freezes the timer and returns the final elapsed time.
    ///
    /// The log stays open so in-flight annotations can still land.
    pub fn stop(&mut self, now: Timestamp) -> SignedDuration {
        self.stopwatch.pause(now);
        self.stopwatch.elapsed(now)
    }

    pub fn into_state(self) -> TrackingState {
        self.state
    }
}
