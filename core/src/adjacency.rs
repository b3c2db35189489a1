use std::collections::HashMap;

use crate::error::Result;
use crate::registry::UserId;

/// Per-user friend sets, stored symmetrically.
///
/// Each set is a `Vec` kept in most-recent-first order: new friends are
/// inserted at the front. Membership checks and removal are O(degree).
/// Existence of the endpoints is the caller's responsibility.
#[derive(Debug, Default)]
pub struct Adjacency {
    sets: HashMap<UserId, Vec<UserId>>,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(users: usize) -> Self {
        Self {
            sets: HashMap::with_capacity(users),
        }
    }

    pub fn contains(&self, a: UserId, b: UserId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Insert the undirected edge `a`-`b`. Returns `false` if it was
    /// already present.
    ///
    /// Room is reserved in both sets before either is touched, so an
    /// allocation failure leaves the store exactly as it was.
    pub fn add_edge(&mut self, a: UserId, b: UserId) -> Result<bool> {
        debug_assert_ne!(a, b);
        if self.contains(a, b) {
            return Ok(false);
        }

        self.sets.entry(a).or_default().try_reserve(1)?;
        self.sets.entry(b).or_default().try_reserve(1)?;

        if let Some(set) = self.sets.get_mut(&a) {
            set.insert(0, b);
        }
        if let Some(set) = self.sets.get_mut(&b) {
            set.insert(0, a);
        }
        Ok(true)
    }

    /// Remove the undirected edge `a`-`b`. Returns `false` if it was absent.
    pub fn remove_edge(&mut self, a: UserId, b: UserId) -> bool {
        let removed = Self::remove_from(self.sets.get_mut(&a), b);
        let mirrored = Self::remove_from(self.sets.get_mut(&b), a);
        debug_assert_eq!(removed, mirrored, "asymmetric edge {a}-{b}");
        removed
    }

    fn remove_from(set: Option<&mut Vec<UserId>>, id: UserId) -> bool {
        let Some(set) = set else {
            return false;
        };
        match set.iter().position(|&n| n == id) {
            Some(pos) => {
                set.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Friends of `a`, most recently added first.
    pub fn neighbors(&self, a: UserId) -> &[UserId] {
        self.sets.get(&a).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn degree(&self, a: UserId) -> usize {
        self.neighbors(a).len()
    }

    /// Sum of all degrees. Every edge is counted once from each end.
    pub fn degree_sum(&self) -> usize {
        self.sets.values().map(|v| v.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.degree_sum() / 2
    }

    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;
        self.sets
            .values()
            .map(|v| size_of::<UserId>() + size_of::<Vec<UserId>>() + v.capacity() * size_of::<UserId>())
            .sum()
    }
}
