use log::{debug, info, warn};
use std::future::Future;
use tokio_util::sync::CancellationToken;

use super::budget::WaitBudget;
use super::clock::{Clock, SystemClock};
use super::settings::PollSettings;
use super::status::PollStatus;
use crate::cancel;
use crate::errors::{Error, Result};

/// Re-runs a status check until it completes or the wait budget runs out.
///
/// The check runs first and the delay follows, so an operation that is
/// already finished costs one call and no waiting. No delay follows the
/// last allowed attempt. Errors from the check end the wait immediately and
/// are returned as they are.
#[derive(Debug, Clone)]
pub struct DeadlinePoller<C = SystemClock> {
    settings: PollSettings,
    clock: C,
    cancellation: Option<CancellationToken>,
}

impl DeadlinePoller {
    pub fn new(settings: PollSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            clock: SystemClock,
            cancellation: None,
        })
    }
}

impl<C: Clock> DeadlinePoller<C> {
    /// Replace the time source of the blocking `wait` methods
    pub fn with_clock<D: Clock>(self, clock: D) -> DeadlinePoller<D> {
        DeadlinePoller {
            settings: self.settings,
            clock,
            cancellation: self.cancellation,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Block until `check` reports [`PollStatus::Complete`]
    pub fn wait<T, E>(
        &self,
        operation: &str,
        mut check: impl FnMut() -> std::result::Result<PollStatus<T>, E>,
    ) -> std::result::Result<T, E>
    where
        E: From<Error>,
    {
        let budget = WaitBudget::start(&self.settings, self.clock.now(), self.clock.utc_now());
        let mut attempts = 0;

        while budget.allows(attempts, self.clock.now()) {
            if self.is_cancelled() {
                return Err(self.cancelled(operation, attempts).into());
            }

            debug!("{}: poll attempt {}", operation, attempts + 1);
            if let PollStatus::Complete(value) = check()? {
                info!("{} completed after {} attempts", operation, attempts + 1);
                return Ok(value);
            }

            attempts += 1;
            if !budget.allows(attempts, self.clock.now()) {
                break;
            }
            self.clock.sleep(self.settings.interval);
        }

        Err(self.timed_out(operation, attempts).into())
    }

    /// Block until `is_complete` accepts the value returned by `check`
    pub fn wait_for<T, E>(
        &self,
        operation: &str,
        mut check: impl FnMut() -> std::result::Result<T, E>,
        is_complete: impl Fn(&T) -> bool,
    ) -> std::result::Result<T, E>
    where
        E: From<Error>,
    {
        self.wait(operation, || {
            check().map(|value| PollStatus::from_predicate(value, &is_complete))
        })
    }

    /// Asynchronous form of [`wait`](Self::wait).
    ///
    /// Delays use `tokio::time`, and a cancellation token interrupts both the
    /// in-flight check and the delay. The clock is consulted only to resolve
    /// an absolute deadline.
    pub async fn wait_async<T, E, Fut>(
        &self,
        operation: &str,
        mut check: impl FnMut() -> Fut,
    ) -> std::result::Result<T, E>
    where
        Fut: Future<Output = std::result::Result<PollStatus<T>, E>>,
        E: From<Error>,
    {
        let budget = WaitBudget::start(&self.settings, tokio_now(), self.clock.utc_now());
        let token = self.cancellation.as_ref();
        let mut attempts = 0;

        while budget.allows(attempts, tokio_now()) {
            if self.is_cancelled() {
                return Err(self.cancelled(operation, attempts).into());
            }

            debug!("{}: poll attempt {}", operation, attempts + 1);
            let Some(status) = cancel::run_until_cancelled(token, check()).await else {
                return Err(self.cancelled(operation, attempts).into());
            };
            if let PollStatus::Complete(value) = status? {
                info!("{} completed after {} attempts", operation, attempts + 1);
                return Ok(value);
            }

            attempts += 1;
            if !budget.allows(attempts, tokio_now()) {
                break;
            }
            let delay = tokio::time::sleep(self.settings.interval);
            if cancel::run_until_cancelled(token, delay).await.is_none() {
                return Err(self.cancelled(operation, attempts).into());
            }
        }

        Err(self.timed_out(operation, attempts).into())
    }

    /// Asynchronous form of [`wait_for`](Self::wait_for)
    pub async fn wait_for_async<T, E, Fut>(
        &self,
        operation: &str,
        mut check: impl FnMut() -> Fut,
        is_complete: impl Fn(&T) -> bool,
    ) -> std::result::Result<T, E>
    where
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<Error>,
    {
        let is_complete = &is_complete;
        self.wait_async(operation, move || {
            let pending = check();
            async move {
                pending
                    .await
                    .map(|value| PollStatus::from_predicate(value, is_complete))
            }
        })
        .await
    }

    fn is_cancelled(&self) -> bool {
        cancel::is_cancelled(self.cancellation.as_ref())
    }

    fn cancelled(&self, operation: &str, attempts: u64) -> Error {
        debug!("{}: wait cancelled after {} attempts", operation, attempts);
        Error::cancelled(operation)
    }

    fn timed_out(&self, operation: &str, attempts: u64) -> Error {
        warn!("{} did not complete after {} attempts", operation, attempts);
        Error::timeout(operation, attempts)
    }
}

fn tokio_now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::ManualClock;
    use chrono::Utc;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Remote(&'static str),
        Local(Error),
    }

    impl From<Error> for TestError {
        fn from(err: Error) -> Self {
            TestError::Local(err)
        }
    }

    fn poller(settings: PollSettings) -> DeadlinePoller {
        DeadlinePoller::new(settings).unwrap()
    }

    #[test]
    fn test_immediate_success_needs_one_call() {
        let clock = ManualClock::new();
        let mut calls = 0;

        let result = poller(PollSettings::new())
            .with_clock(&clock)
            .wait("job-1", || {
                calls += 1;
                Ok::<_, TestError>(PollStatus::Complete("done"))
            });

        assert_eq!(result, Ok("done"));
        assert_eq!(calls, 1);
        assert_eq!(clock.sleeps(), 0);
    }

    #[test]
    fn test_attempt_cap_times_out() {
        let clock = ManualClock::new();
        let mut calls = 0;

        let result = poller(PollSettings::new().with_max_attempts(3))
            .with_clock(&clock)
            .wait("job-2", || {
                calls += 1;
                Ok::<PollStatus<()>, TestError>(PollStatus::Pending)
            });

        assert_eq!(result, Err(TestError::Local(Error::timeout("job-2", 3))));
        assert_eq!(calls, 3);
        assert_eq!(clock.sleeps(), 2);
    }

    #[test]
    fn test_deadline_times_out_before_cap() {
        let clock = ManualClock::new();
        let deadline = clock.utc_now() + chrono::Duration::milliseconds(2500);
        let settings = PollSettings::new()
            .with_deadline(deadline)
            .with_max_attempts(100)
            .with_interval(Duration::from_secs(1));
        let mut calls = 0;

        let result = poller(settings).with_clock(&clock).wait("job-3", || {
            calls += 1;
            Ok::<PollStatus<()>, TestError>(PollStatus::Pending)
        });

        assert_eq!(result, Err(TestError::Local(Error::timeout("job-3", 3))));
        assert_eq!(calls, 3);
        assert!(clock.elapsed() >= Duration::from_millis(2500));
    }

    #[test]
    fn test_timeout_setting_bounds_wait() {
        let clock = ManualClock::new();
        let settings = PollSettings::new()
            .with_timeout(Duration::from_secs(5))
            .with_interval(Duration::from_secs(2));
        let mut calls = 0;

        let result = poller(settings).with_clock(&clock).wait("job-4", || {
            calls += 1;
            Ok::<PollStatus<()>, TestError>(PollStatus::Pending)
        });

        assert!(matches!(result, Err(TestError::Local(Error::Timeout { .. }))));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_check_error_aborts_wait() {
        let clock = ManualClock::new();
        let mut calls = 0;

        let result = poller(PollSettings::new().with_max_attempts(10))
            .with_clock(&clock)
            .wait("job-5", || {
                calls += 1;
                if calls == 2 {
                    Err(TestError::Remote("backend error"))
                } else {
                    Ok::<PollStatus<()>, _>(PollStatus::Pending)
                }
            });

        assert_eq!(result, Err(TestError::Remote("backend error")));
        assert_eq!(calls, 2);
        assert_eq!(clock.sleeps(), 1);
    }

    #[test]
    fn test_wait_for_uses_predicate() {
        let clock = ManualClock::new();
        let mut state = 0;

        let result = poller(PollSettings::new())
            .with_clock(&clock)
            .wait_for(
                "job-6",
                || {
                    state += 1;
                    Ok::<_, TestError>(state)
                },
                |n| *n == 4,
            );

        assert_eq!(result, Ok(4));
        assert_eq!(clock.sleeps(), 3);
    }

    #[test]
    fn test_cancelled_wait_makes_no_calls() {
        let token = CancellationToken::new();
        token.cancel();
        let mut calls = 0;

        let result = poller(PollSettings::new())
            .with_clock(ManualClock::new())
            .with_cancellation(token)
            .wait("job-7", || {
                calls += 1;
                Ok::<PollStatus<()>, TestError>(PollStatus::Pending)
            });

        assert_eq!(result, Err(TestError::Local(Error::cancelled("job-7"))));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = DeadlinePoller::new(PollSettings::new().with_max_attempts(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_attempt_cap() {
        let start = tokio::time::Instant::now();
        let mut calls = 0;

        let result = poller(PollSettings::new().with_max_attempts(3))
            .wait_async("job-8", || {
                calls += 1;
                async { Ok::<PollStatus<()>, TestError>(PollStatus::Pending) }
            })
            .await;

        assert_eq!(result, Err(TestError::Local(Error::timeout("job-8", 3))));
        assert_eq!(calls, 3);
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(2) && waited < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_immediate_success() {
        let start = tokio::time::Instant::now();

        let result = poller(PollSettings::new())
            .wait_for_async("job-9", || async { Ok::<_, TestError>(42) }, |n| *n == 42)
            .await;

        assert_eq!(result, Ok(42));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_timeout_by_duration() {
        let settings = PollSettings::new()
            .with_timeout(Duration::from_millis(2500))
            .with_interval(Duration::from_secs(1));
        let mut calls = 0;

        let result = poller(settings)
            .wait_async("job-10", || {
                calls += 1;
                async { Ok::<PollStatus<()>, TestError>(PollStatus::Pending) }
            })
            .await;

        assert_eq!(result, Err(TestError::Local(Error::timeout("job-10", 3))));
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_check_error_aborts_wait() {
        let mut calls = 0;

        let result = poller(PollSettings::new().with_max_attempts(10))
            .wait_async("job-12", || {
                calls += 1;
                let outcome = if calls == 2 {
                    Err(TestError::Remote("backend error"))
                } else {
                    Ok::<PollStatus<()>, _>(PollStatus::Pending)
                };
                async move { outcome }
            })
            .await;

        assert_eq!(result, Err(TestError::Remote("backend error")));
        assert_eq!(calls, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_deadline_times_out() {
        let deadline = Utc::now() + chrono::Duration::milliseconds(2500);
        let settings = PollSettings::new()
            .with_deadline(deadline)
            .with_max_attempts(100)
            .with_interval(Duration::from_secs(1));
        let mut calls = 0;

        let result = poller(settings)
            .wait_async("job-13", || {
                calls += 1;
                async { Ok::<PollStatus<()>, TestError>(PollStatus::Pending) }
            })
            .await;

        assert_eq!(result, Err(TestError::Local(Error::timeout("job-13", 3))));
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_cancel_interrupts_delay() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            trigger.cancel();
        });
        let mut calls = 0;

        let result = poller(PollSettings::new().with_interval(Duration::from_secs(60)))
            .with_cancellation(token)
            .wait_async("job-11", || {
                calls += 1;
                async { Ok::<PollStatus<()>, TestError>(PollStatus::Pending) }
            })
            .await;

        assert_eq!(result, Err(TestError::Local(Error::cancelled("job-11"))));
        assert_eq!(calls, 1);
    }
}
