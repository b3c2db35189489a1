use tracing::{debug, warn};

use crate::adjacency::Adjacency;
use crate::analytics::{self, Statistics, UserSummary};
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::registry::{Registry, User, UserId};
use crate::traversal::{self, PathResult, Reach};

/// In-memory social graph: user registry plus symmetric friend sets.
///
/// Every public operation validates its user IDs once, then hands off to
/// the adjacency store or the read-only traversal/analytics functions.
/// Query results are owned copies; nothing returned aliases live state.
#[derive(Debug)]
pub struct SocialGraph {
    registry: Registry,
    adjacency: Adjacency,
}

impl SocialGraph {
    pub fn new(config: &GraphConfig) -> Self {
        Self {
            registry: Registry::new(config.max_users, config.max_name_len),
            adjacency: Adjacency::new(),
        }
    }

    /// Pre-allocate adjacency storage for an expected number of users.
    pub fn with_capacity(config: &GraphConfig, users: usize) -> Self {
        Self {
            registry: Registry::new(config.max_users, config.max_name_len),
            adjacency: Adjacency::with_capacity(users.min(config.max_users)),
        }
    }

    // --- Mutations ---

    pub fn create_user(&mut self, name: &str) -> Result<UserId> {
        match self.registry.create_user(name) {
            Ok(id) => {
                debug!(id, name, "user created");
                Ok(id)
            }
            Err(err) => {
                warn!(name, capacity = self.registry.capacity(), "user creation refused");
                Err(err)
            }
        }
    }

    /// Befriend `a` and `b`. Re-adding an existing friendship succeeds
    /// without changing anything.
    pub fn add_friend(&mut self, a: UserId, b: UserId) -> Result<()> {
        self.registry.require(a)?;
        self.registry.require(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }

        if self.adjacency.add_edge(a, b)? {
            debug!(a, b, "friendship added");
        } else {
            debug!(a, b, "friendship already present");
        }
        Ok(())
    }

    /// End the friendship between `a` and `b`. Removing one that does not
    /// exist succeeds without changing anything.
    pub fn remove_friend(&mut self, a: UserId, b: UserId) -> Result<()> {
        self.registry.require(a)?;
        self.registry.require(b)?;

        if self.adjacency.remove_edge(a, b) {
            debug!(a, b, "friendship removed");
        }
        Ok(())
    }

    // --- Identity ---

    pub fn exists(&self, id: UserId) -> bool {
        self.registry.exists(id)
    }

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.registry.get(id)
    }

    pub fn name_of(&self, id: UserId) -> Result<&str> {
        self.registry.name_of(id)
    }

    /// Every user with their friend count, in ID order.
    pub fn users(&self) -> Vec<UserSummary> {
        self.registry
            .iter()
            .map(|u| UserSummary {
                id: u.id,
                name: u.name.clone(),
                degree: self.adjacency.degree(u.id),
            })
            .collect()
    }

    // --- Adjacency queries ---

    /// Friends of `a`, most recently added first.
    pub fn list_friends(&self, a: UserId) -> Result<Vec<UserId>> {
        self.registry.require(a)?;
        Ok(self.adjacency.neighbors(a).to_vec())
    }

    pub fn degree(&self, a: UserId) -> Result<usize> {
        self.registry.require(a)?;
        Ok(self.adjacency.degree(a))
    }

    pub fn are_friends(&self, a: UserId, b: UserId) -> Result<bool> {
        self.registry.require(a)?;
        self.registry.require(b)?;
        Ok(self.adjacency.contains(a, b))
    }

    // --- Traversal ---

    /// Fewest-hops chain of friendships from `a` to `b`. An unreachable
    /// target is a normal result with distance -1 and an empty path.
    pub fn shortest_path(&self, a: UserId, b: UserId) -> Result<PathResult> {
        self.registry.require(a)?;
        self.registry.require(b)?;
        let result = traversal::shortest_path(&self.adjacency, a, b);
        debug!(a, b, distance = result.distance, "shortest path");
        Ok(result)
    }

    /// Pair each step of a path with the user's name.
    pub fn describe_path(&self, path: &PathResult) -> Result<Vec<(UserId, String)>> {
        path.path
            .iter()
            .map(|&id| self.registry.name_of(id).map(|name| (id, name.to_string())))
            .collect()
    }

    /// Everyone within `max_depth` degrees of separation from `a`.
    pub fn within_degrees(&self, a: UserId, max_depth: u32) -> Result<Vec<Reach>> {
        self.registry.require(a)?;
        Ok(traversal::within_degrees(&self.adjacency, a, max_depth))
    }

    /// The friend circle containing `a`, `a` first.
    pub fn component_of(&self, a: UserId) -> Result<Vec<UserId>> {
        self.registry.require(a)?;
        Ok(traversal::component_of(&self.adjacency, a))
    }

    /// Every friend circle, each rooted at its lowest-ID member.
    pub fn components(&self) -> Vec<Vec<UserId>> {
        traversal::components(&self.adjacency, self.registry.iter().map(|u| u.id))
    }

    // --- Analytics ---

    pub fn common_friends(&self, a: UserId, b: UserId) -> Result<Vec<UserId>> {
        self.registry.require(a)?;
        self.registry.require(b)?;
        Ok(analytics::common_friends(&self.adjacency, a, b))
    }

    /// Friend-of-friend suggestions for `a`.
    pub fn recommend(&self, a: UserId) -> Result<Vec<UserId>> {
        self.registry.require(a)?;
        Ok(analytics::recommend(&self.adjacency, a))
    }

    pub fn statistics(&self) -> Statistics {
        analytics::statistics(&self.registry, &self.adjacency)
    }

    pub fn most_connected(&self, top_n: usize) -> Vec<UserSummary> {
        analytics::most_connected(&self.registry, &self.adjacency, top_n)
    }

    // --- Sizing ---

    pub fn user_count(&self) -> usize {
        self.registry.count()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.registry.memory_usage() + self.adjacency.memory_usage()
    }
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new(&GraphConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The four-user network: 1-2, 1-3, 2-4, 3-4.
    fn make_square() -> SocialGraph {
        let mut g = SocialGraph::default();
        for name in ["Zhang San", "Li Si", "Wang Wu", "Zhao Liu"] {
            g.create_user(name).unwrap();
        }
        for (a, b) in [(1, 2), (1, 3), (2, 4), (3, 4)] {
            g.add_friend(a, b).unwrap();
        }
        g
    }

    fn make_chain(n: usize) -> SocialGraph {
        let mut g = SocialGraph::default();
        for i in 0..n {
            g.create_user(&format!("u{}", i + 1)).unwrap();
        }
        for i in 1..n as UserId {
            g.add_friend(i, i + 1).unwrap();
        }
        g
    }

    fn sorted(mut v: Vec<UserId>) -> Vec<UserId> {
        v.sort_unstable();
        v
    }

    fn assert_symmetric(g: &SocialGraph) {
        for u in g.users() {
            for f in g.list_friends(u.id).unwrap() {
                assert!(
                    g.list_friends(f).unwrap().contains(&u.id),
                    "{} lists {} but not the reverse",
                    u.id,
                    f
                );
            }
        }
    }

    // --- Mutations ---

    #[test]
    fn test_add_friend_symmetric() {
        let g = make_square();
        assert_symmetric(&g);
        assert!(g.are_friends(1, 2).unwrap());
        assert!(g.are_friends(2, 1).unwrap());
        assert!(!g.are_friends(1, 4).unwrap());
    }

    #[test]
    fn test_add_friend_idempotent() {
        let mut g = make_square();
        let before = g.list_friends(1).unwrap();
        g.add_friend(1, 2).unwrap();
        g.add_friend(2, 1).unwrap();
        assert_eq!(g.list_friends(1).unwrap(), before);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_add_friend_self_loop() {
        let mut g = make_square();
        assert_eq!(g.add_friend(2, 2), Err(GraphError::SelfLoop(2)));
        assert_eq!(g.degree(2).unwrap(), 2);
    }

    #[test]
    fn test_add_friend_unknown_user() {
        let mut g = make_square();
        assert_eq!(g.add_friend(1, 99), Err(GraphError::NotFound(99)));
        assert_eq!(g.add_friend(0, 1), Err(GraphError::NotFound(0)));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_self_loop_on_unknown_user_is_not_found() {
        let mut g = make_square();
        assert_eq!(g.add_friend(50, 50), Err(GraphError::NotFound(50)));
    }

    #[test]
    fn test_remove_friend() {
        let mut g = make_square();
        g.remove_friend(1, 2).unwrap();
        assert!(!g.are_friends(1, 2).unwrap());
        assert!(!g.are_friends(2, 1).unwrap());
        assert_eq!(g.edge_count(), 3);
        assert_symmetric(&g);
    }

    #[test]
    fn test_remove_missing_friendship_is_noop() {
        let mut g = make_square();
        g.remove_friend(1, 4).unwrap();
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_remove_friend_unknown_user() {
        let mut g = make_square();
        assert_eq!(g.remove_friend(1, 5), Err(GraphError::NotFound(5)));
    }

    #[test]
    fn test_capacity() {
        let mut g = SocialGraph::new(&GraphConfig::with_max_users(2));
        g.create_user("a").unwrap();
        g.create_user("b").unwrap();
        assert_eq!(
            g.create_user("c"),
            Err(GraphError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(g.user_count(), 2);
        assert!(!g.exists(3));
    }

    // --- Queries ---

    #[test]
    fn test_list_friends_most_recent_first() {
        let g = make_square();
        assert_eq!(g.list_friends(1).unwrap(), vec![3, 2]);
        assert_eq!(g.list_friends(7), Err(GraphError::NotFound(7)));
    }

    #[test]
    fn test_users_listing() {
        let mut g = make_square();
        g.create_user("Loner").unwrap();
        let users = g.users();
        assert_eq!(users.len(), 5);
        assert_eq!(users[0].name, "Zhang San");
        assert_eq!(users[0].degree, 2);
        assert_eq!(users[4].id, 5);
        assert_eq!(users[4].degree, 0);
    }

    #[test]
    fn test_shortest_path_chain() {
        let g = make_chain(4);
        let r = g.shortest_path(1, 4).unwrap();
        assert_eq!(r.distance, 3);
        assert_eq!(r.path, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_shortest_path_reflexive() {
        let g = make_square();
        for id in 1..=4 {
            let r = g.shortest_path(id, id).unwrap();
            assert_eq!(r, PathResult { distance: 0, path: vec![id] });
        }
    }

    #[test]
    fn test_shortest_path_disjoint() {
        let mut g = SocialGraph::default();
        for name in ["a", "b", "c", "d"] {
            g.create_user(name).unwrap();
        }
        g.add_friend(1, 2).unwrap();
        g.add_friend(3, 4).unwrap();
        let r = g.shortest_path(1, 3).unwrap();
        assert_eq!(r.distance, -1);
        assert!(r.path.is_empty());
    }

    #[test]
    fn test_shortest_path_unknown_user() {
        let g = make_square();
        assert_eq!(g.shortest_path(1, 9), Err(GraphError::NotFound(9)));
        assert_eq!(g.shortest_path(9, 1), Err(GraphError::NotFound(9)));
    }

    #[test]
    fn test_describe_path() {
        let g = make_chain(3);
        let r = g.shortest_path(1, 3).unwrap();
        let named = g.describe_path(&r).unwrap();
        assert_eq!(
            named,
            vec![(1, "u1".to_string()), (2, "u2".to_string()), (3, "u3".to_string())]
        );
        assert!(g.describe_path(&PathResult::UNREACHABLE).unwrap().is_empty());
    }

    #[test]
    fn test_common_friends() {
        let g = make_square();
        assert_eq!(sorted(g.common_friends(2, 3).unwrap()), vec![1, 4]);
        assert_eq!(g.common_friends(2, 8), Err(GraphError::NotFound(8)));
    }

    #[test]
    fn test_recommend() {
        let g = make_square();
        let recs = g.recommend(1).unwrap();
        assert!(!recs.contains(&1));
        for f in g.list_friends(1).unwrap() {
            assert!(!recs.contains(&f));
        }
        assert_eq!(recs, vec![4]);
    }

    #[test]
    fn test_component_connected_graph() {
        let g = make_square();
        assert_eq!(sorted(g.component_of(2).unwrap()), vec![1, 2, 3, 4]);
        assert_eq!(g.component_of(2).unwrap()[0], 2);
    }

    #[test]
    fn test_components_after_removal() {
        let mut g = make_chain(4);
        g.remove_friend(2, 3).unwrap();
        let circles = g.components();
        assert_eq!(circles.len(), 2);
        assert_eq!(sorted(circles[0].clone()), vec![1, 2]);
        assert_eq!(sorted(circles[1].clone()), vec![3, 4]);
    }

    #[test]
    fn test_within_degrees() {
        let g = make_chain(5);
        let ids: Vec<UserId> = g.within_degrees(1, 2).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_statistics() {
        let g = make_square();
        let s = g.statistics();
        assert_eq!(s.user_count, 4);
        assert_eq!(s.edge_count, 4);
        assert!((s.avg_degree - 2.0).abs() < 1e-9);
        assert_eq!(s.max_degree, 2);
        assert_eq!(s.max_holder, Some(1));
        assert_eq!(s.min_degree, 2);
    }

    #[test]
    fn test_statistics_empty_graph() {
        let g = SocialGraph::default();
        let s = g.statistics();
        assert_eq!(s.user_count, 0);
        assert_eq!(s.edge_count, 0);
        assert_eq!(s.max_holder, None);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = make_square();
        assert!(g.memory_usage() > 0);
    }
}
