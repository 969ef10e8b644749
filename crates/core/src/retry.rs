//! Bounded retry on timeout
//!
//! Only [`ErpError::Timeout`](erpwire_domain::ErpError::Timeout) is retried. Attempts run back to back with no
//! delay; any other error propagates at once.

use std::future::Future;

use erpwire_domain::Result;
use tracing::{debug, warn};

/// Run `operation`, re-running it while it times out and fewer than
/// `max_retries` retries have been made. At most `max_retries + 1` attempts.
///
/// # Examples
///
/// ```
/// # tokio_test::block_on(async {
/// use erpwire_core::retry::call_with_retry;
///
/// let reply = call_with_retry(2, || async { Ok::<_, erpwire_domain::ErpError>("ok") }).await;
/// assert_eq!(reply.unwrap(), "ok");
/// # });
/// ```
pub async fn call_with_retry<T, F, Fut>(max_retries: u32, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retries = 0;
    loop {
        match operation().await {
            Err(err) if err.is_timeout() && retries < max_retries => {
                retries += 1;
                debug!(attempt = retries + 1, max_attempts = max_retries + 1, "retrying after timeout");
            }
            Err(err) => {
                if err.is_timeout() {
                    warn!(attempts = retries + 1, "giving up after repeated timeouts");
                }
                return Err(err);
            }
            Ok(value) => return Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use erpwire_domain::ErpError;

    use super::*;

    fn timeout() -> ErpError {
        ErpError::Timeout(Duration::from_secs(30))
    }

    #[tokio::test]
    async fn third_attempt_result_is_returned() {
        let attempts = AtomicU32::new(0);

        let result = call_with_retry(2, || async {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 { Err(timeout()) } else { Ok(n) }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_with_timeout_after_three_attempts() {
        let attempts = AtomicU32::new(0);

        let result: Result<()> = call_with_retry(2, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(timeout())
        })
        .await;

        assert!(result.unwrap_err().is_timeout());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let attempts = AtomicU32::new(0);

        let result: Result<()> = call_with_retry(2, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(ErpError::NetworkUnreachable("connection refused".into()))
        })
        .await;

        assert!(matches!(result, Err(ErpError::NetworkUnreachable(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
