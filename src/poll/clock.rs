use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Time source of the blocking poller
pub trait Clock {
    /// Monotonic time, used for deadline comparisons
    fn now(&self) -> Instant;

    /// Wall-clock time, used to resolve absolute deadlines
    fn utc_now(&self) -> DateTime<Utc>;

    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        (**self).utc_now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Real time, blocking the current thread on sleep
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when slept on or advanced by hand
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    start_utc: DateTime<Utc>,
    elapsed: Cell<Duration>,
    sleeps: Cell<usize>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            start_utc: Utc::now(),
            elapsed: Cell::new(Duration::ZERO),
            sleeps: Cell::new(0),
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// Number of `sleep` calls so far
    pub fn sleeps(&self) -> usize {
        self.sleeps.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed.get()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.elapsed.get()).unwrap_or(chrono::Duration::zero());
        self.start_utc + elapsed
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(duration);
    }
}
