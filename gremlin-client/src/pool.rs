use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::config::ConnectionOptions;
use crate::connection::{self, WorkerHandle};
use crate::structure::GValue;
use crate::GremlinResult;

/// A fixed-size pool of persistent [`WorkerHandle`]s with a bounded
/// overflow (`pool_size`/`max_overflow`). Unlike `r2d2`/`mobc`,
/// workers are never checked in and out: each is a long-lived actor, so
/// the pool is a round-robin router that, when the worker it would route
/// to is already busy, bursts into a transient overflow worker instead of
/// queueing behind it (see DESIGN.md).
pub struct WorkerPool {
    workers: Vec<WorkerHandle>,
    next: AtomicUsize,
    overflow: Arc<Semaphore>,
    default_timeout: Duration,
    options: ConnectionOptions,
}

impl WorkerPool {
    pub fn new(options: ConnectionOptions) -> WorkerPool {
        let pool_size = options.pool_size.max(1);
        let max_overflow = options.max_overflow;
        let default_timeout = options.default_timeout;

        let workers = (0..pool_size)
            .map(|_| connection::spawn(options.clone()))
            .collect();

        WorkerPool {
            workers,
            next: AtomicUsize::new(0),
            overflow: Arc::new(Semaphore::new(max_overflow)),
            default_timeout,
            options,
        }
    }

    /// Routes a query to the next worker in round-robin order.
    pub async fn query(&self, gremlin: String) -> GremlinResult<Vec<GValue>> {
        self.query_with_timeout(gremlin, self.default_timeout).await
    }

    /// Routes to the next worker in round-robin order, unless it is
    /// already mid-query: in that case, bursts into a transient overflow
    /// worker (up to `max_overflow` concurrently) rather than queueing
    /// behind the busy worker. If the overflow budget is exhausted, falls
    /// back to queueing on the round-robin worker after all.
    pub async fn query_with_timeout(
        &self,
        gremlin: String,
        timeout: Duration,
    ) -> GremlinResult<Vec<GValue>> {
        let worker = self.acquire();

        if worker.is_busy() {
            if let Ok(permit) = self.overflow.clone().try_acquire_owned() {
                tracing::trace!("pool worker busy, bursting into an overflow worker");
                let result = self.run_on_transient_worker(gremlin, timeout).await;
                drop(permit);
                return result;
            }
            tracing::trace!("pool worker busy and overflow exhausted, queueing on the pool worker");
        } else {
            tracing::trace!("routing query to a pool worker");
        }

        worker.query(gremlin, timeout).await
    }

    async fn run_on_transient_worker(&self, gremlin: String, timeout: Duration) -> GremlinResult<Vec<GValue>> {
        let worker = connection::spawn(self.options.clone());
        let result = worker.query(gremlin, timeout).await;
        worker.shutdown().await;
        result
    }

    fn acquire(&self) -> WorkerHandle {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.workers.len();
        self.workers[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_wraps_across_the_pool_size() {
        let pool = WorkerPool {
            workers: vec![],
            next: AtomicUsize::new(usize::MAX),
            overflow: Arc::new(Semaphore::new(0)),
            default_timeout: Duration::from_secs(1),
            options: ConnectionOptions::default(),
        };
        let first = pool.next.fetch_add(1, Ordering::Relaxed);
        assert_eq!(usize::MAX, first);
    }

    #[tokio::test]
    async fn query_with_timeout_does_not_hang_when_overflow_is_exhausted() {
        // With max_overflow at 0, try_acquire_owned always fails, so a
        // busy worker must still be routed to directly rather than
        // blocking indefinitely on overflow capacity.
        let pool = WorkerPool::new(
            ConnectionOptions::builder()
                .max_overflow(0)
                .reconnect_delay(Duration::from_millis(5))
                .build(),
        );
        let outcome = tokio::time::timeout(Duration::from_secs(2), pool.query("g.V()".to_string())).await;
        assert!(outcome.is_ok(), "query_with_timeout must not hang when overflow is exhausted");
    }

    #[tokio::test]
    async fn a_freshly_spawned_worker_is_not_busy() {
        let worker = connection::spawn(ConnectionOptions::default());
        assert!(!worker.is_busy());
    }
}
