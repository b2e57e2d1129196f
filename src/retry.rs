use std::{future::Future, time::Duration};

use tokio::time::sleep;

use crate::{Error, Result, warning};

/// How a failing remote call is retried.
///
/// The first call is attempt 1. After a retryable failure the policy sleeps
/// `base_delay * backoff_factor^(n - 1)` before attempt `n + 1`, until
/// `max_attempts` calls have been made. The last error is then returned.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of calls, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Multiplier applied to the delay after every retry.
    pub backoff_factor: u32,
    /// Upper bound for honoring a server `Retry-After` value.
    pub max_retry_after: Duration,
    /// Decides which errors are retried; all others propagate immediately.
    pub retryable: fn(&Error) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            backoff_factor: 2,
            max_retry_after: Duration::from_secs(120),
            retryable: Error::is_transient,
        }
    }
}

impl RetryPolicy {
    /// Backoff delay slept after the `failed_attempt`-th failure (1-based).
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1);
        self.base_delay
            .saturating_mul(self.backoff_factor.saturating_pow(exponent))
    }

    /// Runs `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent.
    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if (self.retryable)(&err) => {
                    warning!(
                        "Attempt {} of {} to {} failed: {}",
                        attempt,
                        self.max_attempts,
                        operation_name,
                        err
                    );

                    if attempt >= self.max_attempts {
                        warning!("Max retries reached. Giving up.");
                        return Err(err);
                    }

                    sleep(self.wait_after(attempt, &err)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn wait_after(&self, failed_attempt: u32, err: &Error) -> Duration {
        let backoff = self.delay_for(failed_attempt);
        match err.retry_after() {
            Some(requested) if requested <= self.max_retry_after => requested.max(backoff),
            _ => backoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            base_delay: Duration::from_millis(1),
            ..RetryPolicy::default()
        }
    }

    fn unavailable() -> Error {
        Error::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "try later".into(),
            retry_after: None,
        }
    }

    #[test]
    fn test_delays_double_from_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(4), Duration::from_secs(8));
    }

    #[test]
    fn test_retry_after_wins_when_longer_than_backoff() {
        let policy = RetryPolicy::default();
        let err = Error::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: String::new(),
            retry_after: Some(10),
        };
        assert_eq!(policy.wait_after(1, &err), Duration::from_secs(10));

        let excessive = Error::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: String::new(),
            retry_after: Some(3600),
        };
        assert_eq!(policy.wait_after(2, &excessive), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        for failures in 0..5u32 {
            let calls = Arc::new(AtomicU32::new(0));
            let counter = calls.clone();

            let result = fast_policy()
                .run("fetch track", move || {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    async move { if n < failures { Err(unavailable()) } else { Ok(42) } }
                })
                .await;

            assert_eq!(result.unwrap(), 42);
            // one call per retry plus the successful one
            assert_eq!(calls.load(Ordering::SeqCst), failures + 1);
        }
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<()> = fast_policy()
            .run("fetch album", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(unavailable()) }
            })
            .await;

        assert!(matches!(result, Err(Error::Api { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<()> = fast_policy()
            .run("fetch track", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(Error::Api {
                        status: StatusCode::NOT_FOUND,
                        message: "non existing id".into(),
                        retry_after: None,
                    })
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_predicate_controls_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let policy = RetryPolicy {
            max_attempts: 3,
            retryable: |err| matches!(err, Error::Auth(_)),
            ..fast_policy()
        };

        let result: Result<()> = policy
            .run("refresh token", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::Auth("expired".into())) }
            })
            .await;

        assert!(matches!(result, Err(Error::Auth(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
