use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::adjacency::Adjacency;
use crate::registry::UserId;

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// Hop count, or -1 when the target cannot be reached.
    pub distance: i64,
    /// Both endpoints included, start first. Empty when unreachable.
    pub path: Vec<UserId>,
}

impl PathResult {
    pub const UNREACHABLE: PathResult = PathResult {
        distance: -1,
        path: Vec::new(),
    };

    pub fn is_reachable(&self) -> bool {
        self.distance >= 0
    }
}

/// A user found by a depth-limited neighborhood search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reach {
    pub id: UserId,
    /// Degrees of separation from the start user.
    pub distance: u32,
}

/// Unweighted BFS shortest path from `start` to `target`.
///
/// Neighbors are expanded in adjacency order, which decides ties among
/// equal-length paths. The search ends when `target` is dequeued; since a
/// node's parent is fixed when it is first discovered, this yields the same
/// path a discovery-time stop would.
///
/// Both users are assumed to exist.
pub fn shortest_path(adj: &Adjacency, start: UserId, target: UserId) -> PathResult {
    if start == target {
        return PathResult {
            distance: 0,
            path: vec![start],
        };
    }

    // node -> (parent, distance). Start is its own parent.
    let mut visited: HashMap<UserId, (UserId, u32)> = HashMap::new();
    let mut queue: VecDeque<UserId> = VecDeque::new();

    visited.insert(start, (start, 0));
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == target {
            let path = reconstruct_path(&visited, start, target);
            return PathResult {
                distance: (path.len() - 1) as i64,
                path,
            };
        }

        let depth = visited[&current].1;
        for &next in adj.neighbors(current) {
            if !visited.contains_key(&next) {
                visited.insert(next, (current, depth + 1));
                queue.push_back(next);
            }
        }
    }

    PathResult::UNREACHABLE
}

/// Walk parent pointers from `target` back to `start`, then flip into
/// start-to-target order.
fn reconstruct_path(
    visited: &HashMap<UserId, (UserId, u32)>,
    start: UserId,
    target: UserId,
) -> Vec<UserId> {
    let mut path = vec![target];
    let mut current = target;

    while current != start {
        current = visited[&current].0;
        path.push(current);
    }

    path.reverse();
    path
}

/// Everyone within `max_depth` hops of `start`, excluding `start` itself.
///
/// Each user appears once at its minimum distance. Results come out in BFS
/// order, so nearer users always precede farther ones.
pub fn within_degrees(adj: &Adjacency, start: UserId, max_depth: u32) -> Vec<Reach> {
    let mut visited: HashSet<UserId> = HashSet::new();
    let mut queue: VecDeque<(UserId, u32)> = VecDeque::new();
    let mut found = Vec::new();

    visited.insert(start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for &next in adj.neighbors(current) {
            if visited.insert(next) {
                found.push(Reach {
                    id: next,
                    distance: depth + 1,
                });
                queue.push_back((next, depth + 1));
            }
        }
    }

    found
}

/// The friend circle containing `start`, in DFS preorder with `start` first.
///
/// Iterative: each stack frame keeps a cursor into its node's neighbor
/// list, which reproduces the visit order of the recursive formulation
/// without its depth limit.
pub fn component_of(adj: &Adjacency, start: UserId) -> Vec<UserId> {
    let mut visited = HashSet::new();
    let mut component = Vec::new();
    visit_component(adj, start, &mut visited, &mut component);
    component
}

/// Every friend circle among `users`. Each is rooted at its first member
/// in iteration order, so ID-ordered input gives ID-ordered roots.
pub fn components<I>(adj: &Adjacency, users: I) -> Vec<Vec<UserId>>
where
    I: IntoIterator<Item = UserId>,
{
    let mut visited = HashSet::new();
    let mut result = Vec::new();

    for id in users {
        if visited.contains(&id) {
            continue;
        }
        let mut component = Vec::new();
        visit_component(adj, id, &mut visited, &mut component);
        result.push(component);
    }

    result
}

fn visit_component(
    adj: &Adjacency,
    start: UserId,
    visited: &mut HashSet<UserId>,
    out: &mut Vec<UserId>,
) {
    let mut stack: Vec<(UserId, usize)> = vec![(start, 0)];
    visited.insert(start);
    out.push(start);

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        let neighbors = adj.neighbors(node);

        match neighbors.get(cursor) {
            Some(&next) => {
                frame.1 += 1;
                if visited.insert(next) {
                    out.push(next);
                    stack.push((next, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }
}
