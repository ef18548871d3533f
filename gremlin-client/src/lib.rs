//! A client for Apache TinkerPop Gremlin servers: build traversals with a
//! fluent, append-only builder, compile them to Gremlin-Groovy source, and
//! submit them over a persistent, auto-reconnecting WebSocket connection.
//!
//! ```no_run
//! use gremlin_client::process::GraphTraversalSource;
//! use gremlin_client::GremlinClient;
//!
//! # async fn example() -> gremlin_client::GremlinResult<()> {
//! let client = GremlinClient::connect("localhost");
//! let g = GraphTraversalSource::new();
//! let results = client.submit(&g.v(vec![]).has("name", "marko")).await?;
//! # let _ = results;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod connection;
mod error;
mod io;
mod pool;
pub mod process;
mod request;
mod response;
mod structure;

pub use client::{GremlinClient, GremlinExecutor};
pub use config::{ConnectionOptions, ConnectionOptionsBuilder};
pub use error::{GremlinError, GremlinResult};
pub use structure::{Edge, GValue, Path, Property, Vertex, VertexProperty, GID};
