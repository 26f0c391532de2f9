use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::errors::{Error, Result};

const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Bounds and pacing of a wait loop.
///
/// Every bound is optional: without `max_attempts` the attempt count is
/// unbounded, and without `deadline` or `timeout` the wait never expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    pub max_attempts: Option<u64>,
    /// Absolute point in time after which no further attempt starts
    pub deadline: Option<DateTime<Utc>>,
    /// Relative alternative to `deadline`, measured from the start of the wait
    pub timeout: Option<Duration>,
    /// Delay between two attempts
    pub interval: Duration,
}

impl PollSettings {
    pub fn new() -> Self {
        Self {
            max_attempts: None,
            deadline: None,
            timeout: None,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }

    pub fn with_max_attempts(mut self, max: u64) -> Self {
        self.max_attempts = Some(max);
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == Some(0) {
            return Err(Error::invalid_argument("max_attempts", "must be positive"));
        }
        if self.interval.is_zero() {
            return Err(Error::invalid_argument("interval", "must be positive"));
        }
        if self.deadline.is_some() && self.timeout.is_some() {
            return Err(Error::invalid_argument(
                "timeout",
                "cannot be combined with an absolute deadline",
            ));
        }
        Ok(())
    }

    /// Absolute deadline for a wait starting at `now`, if any
    pub fn effective_deadline(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.deadline.or_else(|| {
            let timeout = chrono::Duration::from_std(self.timeout?).ok()?;
            now.checked_add_signed(timeout)
        })
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::new()
    }
}
