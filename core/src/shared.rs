use std::sync::Arc;

use parking_lot::RwLock;

use crate::analytics::{Statistics, UserSummary};
use crate::config::GraphConfig;
use crate::error::Result;
use crate::graph::SocialGraph;
use crate::registry::UserId;
use crate::traversal::PathResult;

/// Thread-safe handle to one [`SocialGraph`].
///
/// Mutations take the write lock for their full duration; queries share
/// the read lock and return owned results, so no caller ever holds a
/// reference into the live adjacency sets.
#[derive(Debug, Clone)]
pub struct SharedGraph {
    inner: Arc<RwLock<SocialGraph>>,
}

impl SharedGraph {
    pub fn new(config: &GraphConfig) -> Self {
        Self::from_graph(SocialGraph::new(config))
    }

    pub fn from_graph(graph: SocialGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn create_user(&self, name: &str) -> Result<UserId> {
        self.inner.write().create_user(name)
    }

    pub fn add_friend(&self, a: UserId, b: UserId) -> Result<()> {
        self.inner.write().add_friend(a, b)
    }

    pub fn remove_friend(&self, a: UserId, b: UserId) -> Result<()> {
        self.inner.write().remove_friend(a, b)
    }

    pub fn list_friends(&self, a: UserId) -> Result<Vec<UserId>> {
        self.inner.read().list_friends(a)
    }

    pub fn shortest_path(&self, a: UserId, b: UserId) -> Result<PathResult> {
        self.inner.read().shortest_path(a, b)
    }

    pub fn common_friends(&self, a: UserId, b: UserId) -> Result<Vec<UserId>> {
        self.inner.read().common_friends(a, b)
    }

    pub fn recommend(&self, a: UserId) -> Result<Vec<UserId>> {
        self.inner.read().recommend(a)
    }

    pub fn component_of(&self, a: UserId) -> Result<Vec<UserId>> {
        self.inner.read().component_of(a)
    }

    pub fn statistics(&self) -> Statistics {
        self.inner.read().statistics()
    }

    pub fn users(&self) -> Vec<UserSummary> {
        self.inner.read().users()
    }

    /// Run an arbitrary read-only closure under the shared lock.
    pub fn with_graph<R, F: FnOnce(&SocialGraph) -> R>(&self, f: F) -> R {
        f(&self.inner.read())
    }
}
