//! Call spacing for evidence sources.
//!
//! Uses the governor crate for the spacing and a fair async mutex so callers
//! start in submission order. Schedulers are values: clone one into every
//! client that must share the same budget.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::traits::evidence_source::EvidenceSource;
use crate::types::document::Document;

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// At most one call begins per interval; waiting callers queue FIFO.
#[derive(Clone)]
pub struct CallScheduler {
    limiter: Option<Arc<DirectRateLimiter>>,
    queue: Arc<Mutex<()>>,
    interval: Duration,
}

impl CallScheduler {
    /// Create a scheduler that starts one call per `interval`.
    ///
    /// A zero interval disables spacing but keeps the ordering.
    pub fn new(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval).map(|quota| Arc::new(RateLimiter::direct(quota)));
        Self {
            limiter,
            queue: Arc::new(Mutex::new(())),
            interval,
        }
    }

    /// Create a scheduler from an interval in milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// A scheduler that never waits.
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for this caller's turn.
    pub async fn acquire(&self) {
        let _turn = self.queue.lock().await;
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for CallScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallScheduler")
            .field("interval", &self.interval)
            .finish()
    }
}

/// An evidence source wrapper that enforces call spacing.
pub struct RateLimitedSource<S: EvidenceSource> {
    inner: S,
    scheduler: CallScheduler,
}

impl<S: EvidenceSource> RateLimitedSource<S> {
    /// Wrap a source with its own scheduler.
    pub fn new(source: S, interval: Duration) -> Self {
        Self::with_scheduler(source, CallScheduler::new(interval))
    }

    /// Wrap a source with a shared scheduler.
    pub fn with_scheduler(source: S, scheduler: CallScheduler) -> Self {
        Self {
            inner: source,
            scheduler,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: EvidenceSource> EvidenceSource for RateLimitedSource<S> {
    async fn search(&self, query: &str) -> Result<Vec<Document>> {
        self.scheduler.acquire().await;
        self.inner.search(query).await
    }
}

/// Extension trait for easy rate limiting.
pub trait EvidenceSourceExt: EvidenceSource + Sized {
    /// Wrap this source so calls start at most once per interval.
    fn rate_limited(self, interval: Duration) -> RateLimitedSource<Self> {
        RateLimitedSource::new(self, interval)
    }

    /// Wrap this source with a scheduler shared with other clients.
    fn scheduled(self, scheduler: CallScheduler) -> RateLimitedSource<Self> {
        RateLimitedSource::with_scheduler(self, scheduler)
    }
}

impl<S: EvidenceSource + Sized> EvidenceSourceExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockEvidenceSource;
    use std::time::Instant;

    #[tokio::test]
    async fn test_calls_are_spaced() {
        let source = MockEvidenceSource::new().rate_limited(Duration::from_millis(200));

        let start = Instant::now();
        for query in ["a", "b", "c"] {
            source.search(query).await.unwrap();
        }
        let elapsed = start.elapsed();

        // First call is immediate, the next two wait one interval each.
        assert!(elapsed.as_millis() >= 350, "Rate limiting not working: {:?}", elapsed);
        assert_eq!(source.inner().calls().len(), 3);
    }

    #[tokio::test]
    async fn test_callers_start_in_submission_order() {
        let scheduler = CallScheduler::from_millis(50);
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for i in 0..4 {
            let scheduler = scheduler.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                scheduler.acquire().await;
                order.lock().unwrap().push(i);
            }));
            // Let the task reach the queue before the next one is spawned.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_shared_scheduler_spans_clients() {
        let scheduler = CallScheduler::from_millis(200);
        let a = MockEvidenceSource::new().scheduled(scheduler.clone());
        let b = MockEvidenceSource::new().scheduled(scheduler);

        let start = Instant::now();
        a.search("x").await.unwrap();
        b.search("y").await.unwrap();

        assert!(start.elapsed().as_millis() >= 150);
    }

    #[tokio::test]
    async fn test_unlimited_scheduler_does_not_wait() {
        let scheduler = CallScheduler::unlimited();
        let start = Instant::now();
        for _ in 0..5 {
            scheduler.acquire().await;
        }
        assert!(start.elapsed().as_millis() < 100);
    }
}
