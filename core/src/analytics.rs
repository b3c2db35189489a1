use std::collections::HashSet;

use serde::Serialize;

use crate::adjacency::Adjacency;
use crate::registry::{Registry, UserId};

/// Degree summary of the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub user_count: usize,
    pub edge_count: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    /// Lowest-ID user holding `max_degree`. None on an empty graph.
    pub max_holder: Option<UserId>,
    pub min_degree: usize,
}

/// One row of a user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub degree: usize,
}

/// Friends shared by `a` and `b`, in `a`'s adjacency order.
pub fn common_friends(adj: &Adjacency, a: UserId, b: UserId) -> Vec<UserId> {
    let theirs = adj.neighbors(b);
    adj.neighbors(a)
        .iter()
        .copied()
        .filter(|n| theirs.contains(n))
        .collect()
}

/// Friends of friends that are not already friends of `a` (nor `a`).
///
/// Candidates appear once, in the order first reached while scanning
/// `a`'s friends and then each friend's own friends.
pub fn recommend(adj: &Adjacency, a: UserId) -> Vec<UserId> {
    let direct = adj.neighbors(a);
    let mut excluded: HashSet<UserId> = direct.iter().copied().collect();
    excluded.insert(a);

    let mut result = Vec::new();
    for &friend in direct {
        for &candidate in adj.neighbors(friend) {
            if excluded.insert(candidate) {
                result.push(candidate);
            }
        }
    }
    result
}

/// Degree statistics over every live user. Zero-filled when empty.
pub fn statistics(registry: &Registry, adj: &Adjacency) -> Statistics {
    let mut user_count = 0usize;
    let mut degree_sum = 0usize;
    let mut max_degree = 0usize;
    let mut max_holder = None;
    let mut min_degree = usize::MAX;

    for user in registry.iter() {
        let degree = adj.degree(user.id);
        user_count += 1;
        degree_sum += degree;
        if max_holder.is_none() || degree > max_degree {
            max_degree = degree;
            max_holder = Some(user.id);
        }
        min_degree = min_degree.min(degree);
    }

    if user_count == 0 {
        return Statistics {
            user_count: 0,
            edge_count: 0,
            avg_degree: 0.0,
            max_degree: 0,
            max_holder: None,
            min_degree: 0,
        };
    }

    Statistics {
        user_count,
        edge_count: degree_sum / 2,
        avg_degree: degree_sum as f64 / user_count as f64,
        max_degree,
        max_holder,
        min_degree,
    }
}

/// Users ranked by degree.
///
/// If `top_n` is 0, returns everyone. Otherwise returns the top N by
/// degree (descending). Ties are broken by user ID (ascending).
pub fn most_connected(registry: &Registry, adj: &Adjacency, top_n: usize) -> Vec<UserSummary> {
    let mut results: Vec<UserSummary> = registry
        .iter()
        .map(|u| UserSummary {
            id: u.id,
            name: u.name.clone(),
            degree: adj.degree(u.id),
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.id.cmp(&b.id)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
