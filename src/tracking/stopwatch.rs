//! Elapsed-time tracking that stands still while paused.

use jiff::{SignedDuration, Timestamp};

/// Accumulates running time across pauses.
///
/// Time is always passed in, never read from the clock here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    /// Time banked before the current run.
    banked: SignedDuration,

    /// Start of the current run, if running.
    running_since: Option<Timestamp>,
}

impl Stopwatch {
    /// Starts or restarts the clock. No-op if already running.
    pub fn resume(&mut self, now: Timestamp) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Banks the current run. No-op if already stopped.
    pub fn pause(&mut self, now: Timestamp) {
        if let Some(since) = self.running_since.take() {
            self.banked += now.duration_since(since);
        }
    }

    pub fn elapsed(&self, now: Timestamp) -> SignedDuration {
        match self.running_since {
            Some(since) => self.banked + now.duration_since(since),
            None => self.banked,
        }
    }
}
