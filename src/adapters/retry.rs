//! Retry with exponential backoff for REST calls

use crate::config::RetryConfig;
use crate::domain::Result;
use std::future::Future;
use std::time::Duration;

/// Delay before retry number `attempt` (1-based)
pub(crate) fn backoff_delay(retry: &RetryConfig, attempt: usize) -> Duration {
    let factor = retry
        .backoff_multiplier
        .powi(attempt.saturating_sub(1).min(32) as i32);
    let delay_ms = (retry.initial_delay_ms as f64 * factor).min(retry.max_delay_ms as f64);
    Duration::from_millis(delay_ms as u64)
}

/// Retry an operation with exponential backoff
///
/// Only retryable errors (connection failures and 5xx responses) are retried; the
/// operation runs at most `retry.max_retries` times.
pub(crate) async fn retry_request<F, T, Fut>(retry: &RetryConfig, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_retries = retry.max_retries.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if attempt >= max_retries || !e.is_retryable() {
                    return Err(e);
                }

                let delay = backoff_delay(retry, attempt);

                crate::log_retry_attempt!(attempt, max_retries, delay.as_millis() as u64, e);

                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlatformError, VendorSyncError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
        }
    }

    #[test]
    fn test_backoff_delay_grows_and_caps() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 100,
            max_delay_ms: 350,
            backoff_multiplier: 2.0,
        };
        assert_eq!(backoff_delay(&retry, 1), Duration::from_millis(100));
        assert_eq!(backoff_delay(&retry, 2), Duration::from_millis(200));
        assert_eq!(backoff_delay(&retry, 3), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_retries_server_errors_until_success() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result = retry_request(&fast_retry(), || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(VendorSyncError::Platform(PlatformError::ServerError {
                    status: 503,
                    message: "busy".to_string(),
                }))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result: Result<()> = retry_request(&fast_retry(), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(VendorSyncError::Platform(PlatformError::ClientError {
                status: 404,
                message: "missing".to_string(),
            }))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result: Result<()> = retry_request(&fast_retry(), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(VendorSyncError::Platform(PlatformError::ConnectionFailed(
                "refused".to_string(),
            )))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
