//! social-graph-core: In-memory social graph engine.
//!
//! Maintains a bounded registry of users and symmetric friendship sets,
//! and answers shortest-path ("degrees of separation"), common-friend,
//! friend-of-friend recommendation and friend-circle queries.
//!
//! Single-threaded by default; wrap a graph in [`SharedGraph`] to share it
//! between threads under a reader/writer lock.

mod adjacency;
mod analytics;
mod config;
mod error;
mod graph;
mod registry;
mod shared;
mod traversal;

pub use analytics::{Statistics, UserSummary};
pub use config::GraphConfig;
pub use error::{ConfigError, GraphError, Result};
pub use graph::SocialGraph;
pub use registry::{User, UserId};
pub use shared::SharedGraph;
pub use traversal::{PathResult, Reach};
