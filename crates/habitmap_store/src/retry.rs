//! Retry wrapper for transient store failures.
//!
//! Only outcomes a retry could change are retried: transport errors and
//! `Unavailable` responses. Auth, not-found, and validation failures are
//! terminal and surface on the first attempt.

use crate::{StoreError, StoreResult};
use rand::{RngExt, rng};
use std::time::Duration;

impl StoreError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Http(_) | StoreError::Unavailable { .. }
        )
    }
}

/// Exponential backoff with full jitter around a [`LogStore`](crate::LogStore)
/// call.
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Run `op`, sleeping between attempts while the failure is transient.
    ///
    /// The final transient error is returned once `max_attempts` is spent;
    /// terminal errors are returned immediately.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = StoreResult<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                    tracing::debug!(attempt, error = %err, "transient store failure, retrying");
                    tokio::time::sleep(self.delay_for(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    // Full jitter: a uniform draw from zero up to the doubled-per-attempt cap.
    fn delay_for(&self, attempt: u32) -> Duration {
        let cap = self.base_delay.saturating_mul(1u32 << attempt.min(10));
        let cap_ms = cap.as_millis() as u64;
        Duration::from_millis(rng().random_range(0..=cap_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
        }
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable {
            status: 503,
            body: "maintenance".into(),
        }
    }

    #[tokio::test]
    async fn recovers_from_transient_outage() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result = fast_policy(3)
            .run(move || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(unavailable())
                    } else {
                        Ok(7u32)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result: StoreResult<()> = fast_policy(2)
            .run(move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(unavailable())
                }
            })
            .await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result: StoreResult<()> = fast_policy(3)
            .run(move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(StoreError::Auth("invalid token".into()))
                }
            })
            .await;
        assert!(matches!(result, Err(StoreError::Auth(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn transient_classification_matches_the_taxonomy() {
        assert!(unavailable().is_transient());
        assert!(!StoreError::Auth("no".into()).is_transient());
        assert!(!StoreError::NotFound("gone".into()).is_transient());
        assert!(!StoreError::InvalidInput("bad color".into()).is_transient());
    }
}
