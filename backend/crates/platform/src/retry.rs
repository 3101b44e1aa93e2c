//! Store-call retry policy
//!
//! Every call into a backing store gets its own timeout, separate from any
//! request deadline. Failures the error type classifies as transient
//! (timeouts, dropped connections) are retried with exponential backoff;
//! everything else is returned on the first occurrence.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Classifies errors for [`RetryPolicy::run`]
pub trait Retryable {
    /// `true` when repeating the same call may succeed
    fn is_transient(&self) -> bool;
}

/// A single attempt exceeded [`RetryPolicy::op_timeout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{operation} timed out after {}ms", after.as_millis())]
pub struct TimedOut {
    pub operation: &'static str,
    pub after: Duration,
}

/// Timeout and backoff settings for store calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound for one attempt
    pub op_timeout: Duration,
    /// Retries after the first attempt (0 disables retrying)
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each later one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            op_timeout: Duration::from_secs(3),
            max_retries: 2,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, same timeout
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Backoff before retry number `retry` (0-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << retry.min(16))
    }

    /// Run `op` under this policy.
    ///
    /// `op` is called again for each retry, so it must build a fresh future
    /// every time.
    pub async fn run<T, E, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + From<TimedOut> + fmt::Display,
    {
        let mut retry = 0;
        loop {
            let result = match tokio::time::timeout(self.op_timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(E::from(TimedOut {
                    operation,
                    after: self.op_timeout,
                })),
            };

            match result {
                Err(err) if err.is_transient() && retry < self.max_retries => {
                    let delay = self.delay_for(retry);
                    tracing::warn!(
                        operation,
                        retry = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient store failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq, Eq)]
    enum TestError {
        Transient,
        Fatal,
        Timeout,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl Retryable for TestError {
        fn is_transient(&self) -> bool {
            matches!(self, TestError::Transient | TestError::Timeout)
        }
    }

    impl From<TimedOut> for TestError {
        fn from(_: TimedOut) -> Self {
            TestError::Timeout
        }
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            op_timeout: Duration::from_millis(50),
            max_retries,
            base_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_transient_then_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<u32, TestError> = fast_policy(2)
            .run("test.op", || {
                let calls = calls.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(TestError::Transient)
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<(), TestError> = fast_policy(2)
            .run("test.op", || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Transient)
                }
            })
            .await;

        assert_eq!(result, Err(TestError::Transient));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fatal_fails_fast() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<(), TestError> = fast_policy(5)
            .run("test.op", || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(TestError::Fatal)
                }
            })
            .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let result: Result<(), TestError> = fast_policy(0)
            .run("test.slow", || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert_eq!(result, Err(TestError::Timeout));
    }

    #[test]
    fn test_timed_out_display() {
        let err = TimedOut {
            operation: "session.get",
            after: Duration::from_secs(3),
        };
        assert_eq!(err.to_string(), "session.get timed out after 3000ms");
    }
}
