//! Quiet-period coalescing of raw text input.
//!
//! The buffer never reads a clock itself: callers pass the instant at which
//! each input arrived and the instant of every poll, so the same sequence of
//! events always commits the same values.

use std::time::{Duration, Instant};

/// Default quiet period after the last keystroke before a search commits.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// Coalesces rapid input into one commit per quiet period.
///
/// Only the most recent pending value survives; earlier ones are superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDebouncer {
    quiet_period: Duration,
    pending: Option<Pending>,
}

impl Default for InputDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl InputDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Records raw input and restarts the quiet period from `at`.
    pub fn push(&mut self, text: impl Into<String>, at: Instant) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: at + self.quiet_period,
        });
    }

    /// Returns the pending value once its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending.take().map(|pending| pending.text)
            }
            _ => None,
        }
    }

    /// Commits `text` immediately and cancels any pending delayed commit.
    pub fn force_commit(&mut self, text: impl Into<String>) -> String {
        self.pending = None;
        text.into()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending value becomes ready, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}
