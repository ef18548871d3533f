use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ConnectionOptions;
use crate::pool::WorkerPool;
use crate::process::Traversal;
use crate::structure::GValue;
use crate::GremlinResult;

/// Abstracts over submitting a query, so callers (e.g. `gremlin-cli`) can
/// depend on this instead of the concrete [`GremlinClient`].
#[async_trait]
pub trait GremlinExecutor {
    async fn execute(&self, gremlin: impl Into<String> + Send) -> GremlinResult<Vec<GValue>>;
}

/// The public façade over the Connection Worker's data flow: builds a
/// traversal or a raw Groovy string, submits it through the worker pool,
/// and returns decoded [`GValue`]s.
#[derive(Clone)]
pub struct GremlinClient {
    pool: Arc<WorkerPool>,
}

impl GremlinClient {
    /// Connects a pool of `options.pool_size` workers.
    pub fn connect<T: Into<ConnectionOptions>>(options: T) -> GremlinClient {
        GremlinClient {
            pool: Arc::new(WorkerPool::new(options.into())),
        }
    }

    /// Encodes `traversal` and submits it, using the configured default
    /// timeout.
    pub async fn submit(&self, traversal: &Traversal) -> GremlinResult<Vec<GValue>> {
        let gremlin = traversal.encode()?;
        self.pool.query(gremlin).await
    }

    /// Submits a raw Gremlin-Groovy string directly.
    pub async fn execute(&self, gremlin: impl Into<String>) -> GremlinResult<Vec<GValue>> {
        self.pool.query(gremlin.into()).await
    }

    /// Like [`execute`](Self::execute), with an explicit per-call timeout
    /// overriding `default_timeout`.
    pub async fn query(&self, gremlin: impl Into<String>, timeout: Duration) -> GremlinResult<Vec<GValue>> {
        self.pool.query_with_timeout(gremlin.into(), timeout).await
    }
}

#[async_trait]
impl GremlinExecutor for GremlinClient {
    async fn execute(&self, gremlin: impl Into<String> + Send) -> GremlinResult<Vec<GValue>> {
        self.pool.query(gremlin.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_accepts_a_bare_host_string() {
        let _client = GremlinClient::connect("localhost");
    }

    #[tokio::test]
    async fn connect_accepts_a_host_port_tuple() {
        let _client = GremlinClient::connect(("localhost", 8182));
    }
}
