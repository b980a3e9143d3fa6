//! Wait conditions and polling strategies.
//!
//! Single-page apps update the DOM asynchronously after a click. Instead of
//! sleeping a fixed amount after every interaction, callers poll the
//! observable they care about until it settles or a timeout elapses.
//!
//! Two building blocks:
//!
//! - [`wait_for_result`]: poll a fallible boolean condition, treating errors
//!   as "not yet".
//! - [`settle`]: poll a fallible probe that yields a value until the value
//!   is accepted, keeping the last observation for error reporting.

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Default timeout for wait operations (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for wait operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to check if the condition is satisfied.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with custom timeout and default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Result of polling a probe with [`settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T> {
    /// The probe produced an accepted value.
    Matched(T),
    /// The timeout elapsed first. `last` is the final observation, or `None`
    /// if the probe never produced a value (e.g. the element never appeared).
    TimedOut {
        /// Last value the probe returned
        last: Option<T>,
    },
}

impl<T> Settled<T> {
    /// Returns true if the probe settled on an accepted value.
    pub fn is_matched(&self) -> bool {
        matches!(self, Settled::Matched(_))
    }
}

/// Waits for a condition that returns a `Result<bool>`.
///
/// Errors from the condition are treated as transient and polling continues.
///
/// # Errors
///
/// Returns `WaitTimeout` if the condition never returns `Ok(true)`.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        match condition().await {
            Ok(true) => return Ok(()),
            Ok(false) | Err(_) => {}
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

/// Polls `probe` until `accept` returns true for its value.
///
/// Absence errors (see [`BrowserError::is_absence`]) count as "no value yet";
/// any other probe error aborts the wait immediately. The probe always runs
/// at least once, even with a zero timeout.
///
/// # Errors
///
/// Propagates non-absence errors from the probe.
pub async fn settle<T, F, Fut, P>(probe: F, accept: P, config: WaitConfig) -> Result<Settled<T>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let start = Instant::now();
    let mut last = None;

    loop {
        match probe().await {
            Ok(value) if accept(&value) => return Ok(Settled::Matched(value)),
            Ok(value) => last = Some(value),
            Err(e) if e.is_absence() => {}
            Err(e) => return Err(e),
        }

        if start.elapsed() >= config.timeout {
            return Ok(Settled::TimedOut { last });
        }

        sleep(config.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn quick() -> WaitConfig {
        WaitConfig::new(Duration::from_millis(100), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn wait_for_result_times_out_with_configured_bound() {
        let result = wait_for_result(|| async { Ok(false) }, quick(), "document ready").await;

        match result {
            Err(BrowserError::WaitTimeout { condition, timeout }) => {
                assert_eq!(condition, "document ready");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected a timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wait_for_result_treats_errors_as_pending() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let result = wait_for_result(
            move || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(BrowserError::ScriptExecutionFailed("not ready".into()))
                    } else {
                        Ok(true)
                    }
                }
            },
            WaitConfig::with_timeout(Duration::from_secs(5)),
            "eventually ready",
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn settle_returns_matching_value() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let settled = settle(
            move || {
                let c = c.clone();
                async move { Ok(c.fetch_add(1, Ordering::SeqCst).to_string()) }
            },
            |v: &String| v == "2",
            WaitConfig::with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();

        assert_eq!(settled, Settled::Matched("2".to_string()));
    }

    #[tokio::test]
    async fn settle_keeps_last_observation_on_timeout() {
        let settled = settle(|| async { Ok("1".to_string()) }, |v: &String| v == "0", quick())
            .await
            .unwrap();

        assert_eq!(
            settled,
            Settled::TimedOut {
                last: Some("1".to_string())
            }
        );
    }

    #[tokio::test]
    async fn settle_tolerates_missing_elements() {
        let settled: Settled<String> = settle(
            || async {
                Err(BrowserError::ElementNotFound {
                    selector: "#resultsScreen".into(),
                })
            },
            |_| true,
            quick(),
        )
        .await
        .unwrap();

        assert_eq!(settled, Settled::TimedOut { last: None });
    }

    #[tokio::test]
    async fn settle_aborts_on_hard_errors() {
        let result: Result<Settled<String>> = settle(
            || async { Err(BrowserError::AlreadyClosed) },
            |_| true,
            WaitConfig::with_timeout(Duration::from_secs(5)),
        )
        .await;

        assert!(matches!(result, Err(BrowserError::AlreadyClosed)));
    }
}
