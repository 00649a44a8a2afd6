//! Bounded-concurrency batch lookups with per-item failure isolation.
//!
//! [`FetchCoordinator::run`] drives one async lookup per item with at most
//! `max_concurrency` in flight. Items are admitted in input order as slots
//! free up; completion order is unspecified. Each lookup has its own timeout.
//! A lookup that errors or times out yields `None` for its item and nothing
//! else: siblings keep running and the batch as a whole always succeeds.

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_MAX_CONCURRENCY, default_fetch_timeout};
use crate::utils::progress::ProgressBar;

/// Runs batches of independent lookups.
#[derive(Clone)]
pub struct FetchCoordinator {
    max_concurrency: usize,
    timeout: Duration,
    progress: Option<ProgressBar>,
}

impl Default for FetchCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY, default_fetch_timeout())
    }
}

impl FetchCoordinator {
    /// A coordinator with the given cap (at least one) and per-item timeout.
    #[must_use]
    pub fn new(max_concurrency: usize, timeout: Duration) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            timeout,
            progress: None,
        }
    }

    /// Advance `progress` by one as each item completes.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Look up every item, returning an entry for each distinct item.
    ///
    /// An empty input returns immediately without calling `lookup`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ctxdocs_cli::fetch::FetchCoordinator;
    ///
    /// # async fn example() {
    /// let coordinator = FetchCoordinator::default();
    /// let results = coordinator
    ///     .run(vec![1u32, 2, 3], |n| async move {
    ///         if n == 2 { anyhow::bail!("boom") } else { Ok(n * 10) }
    ///     })
    ///     .await;
    ///
    /// assert_eq!(results[&1], Some(10));
    /// assert_eq!(results[&2], None);
    /// # }
    /// ```
    pub async fn run<K, T, F, Fut>(&self, items: Vec<K>, lookup: F) -> HashMap<K, Option<T>>
    where
        K: Eq + Hash + Clone + Debug,
        F: Fn(K) -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        if items.is_empty() {
            return HashMap::new();
        }

        let timeout = self.timeout;
        let progress = self.progress.as_ref();

        stream::iter(items)
            .map(|item| {
                let pending = lookup(item.clone());
                async move {
                    let result = match tokio::time::timeout(timeout, pending).await {
                        Ok(Ok(value)) => Some(value),
                        Ok(Err(e)) => {
                            debug!("Lookup for {item:?} failed: {e:#}");
                            None
                        }
                        Err(_) => {
                            warn!("Lookup for {item:?} timed out after {}ms", timeout.as_millis());
                            None
                        }
                    };
                    if let Some(progress) = progress {
                        progress.inc(1);
                    }
                    (item, result)
                }
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_cap_respected_and_failures_isolated() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let coordinator = FetchCoordinator::new(5, Duration::from_secs(5));

        let results = coordinator
            .run((0..10).collect(), |n: u32| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);

                    if n % 3 == 1 {
                        anyhow::bail!("lookup {n} rejected");
                    }
                    Ok(format!("v{n}"))
                }
            })
            .await;

        assert_eq!(results.len(), 10);
        assert!(peak.load(Ordering::SeqCst) <= 5);
        assert_eq!(results.values().filter(|r| r.is_none()).count(), 3);
        assert_eq!(results[&0].as_deref(), Some("v0"));
        assert_eq!(results[&1], None);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let calls = AtomicUsize::new(0);
        let results = FetchCoordinator::default()
            .run(Vec::<String>::new(), |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            })
            .await;

        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_timeout_isolated_per_item() {
        let coordinator = FetchCoordinator::new(2, Duration::from_millis(50));
        let results = coordinator
            .run(vec!["slow", "fast"], |item| async move {
                if item == "slow" {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
                Ok(item.len())
            })
            .await;

        assert_eq!(results["slow"], None);
        assert_eq!(results["fast"], Some(4));
    }

    #[tokio::test]
    async fn test_cap_of_one_is_sequential() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        FetchCoordinator::new(0, Duration::from_secs(1))
            .run(vec![1, 2, 3], |_| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .await;

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
