use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

use super::settings::PollSettings;

/// Attempt cap and deadline of one wait, fixed when the wait starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBudget {
    max_attempts: u64,
    deadline: Option<Instant>,
}

impl WaitBudget {
    /// Resolve the settings against the current time.
    ///
    /// The wall-clock deadline is turned into a monotonic instant once, so a
    /// later system clock adjustment does not stretch or shorten the wait.
    pub fn start(settings: &PollSettings, now: Instant, utc_now: DateTime<Utc>) -> Self {
        let deadline = settings
            .effective_deadline(utc_now)
            .and_then(|deadline| now.checked_add(remaining(deadline, utc_now)));

        Self {
            max_attempts: settings.max_attempts.unwrap_or(u64::MAX),
            deadline,
        }
    }

    /// Both bounds must hold for another attempt to start
    pub fn allows(&self, attempts: u64, now: Instant) -> bool {
        self.has_attempts_left(attempts) && self.before_deadline(now)
    }

    pub fn has_attempts_left(&self, attempts: u64) -> bool {
        attempts < self.max_attempts
    }

    pub fn before_deadline(&self, now: Instant) -> bool {
        self.deadline.is_none_or(|deadline| now < deadline)
    }
}

fn remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (deadline - now).to_std().unwrap_or(Duration::ZERO)
}
