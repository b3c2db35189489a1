use crate::error::{GraphError, Result};

/// User identifier. Assigned from 1 upward and never reused.
pub type UserId = u64;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// False marks a tombstoned slot; lookups on it fail with `NotFound`.
    pub exists: bool,
}

/// Assigns user IDs and owns display names.
///
/// Slots are dense: user `id` lives at index `id - 1`.
#[derive(Debug)]
pub struct Registry {
    users: Vec<User>,
    next_id: UserId,
    live: usize,
    capacity: usize,
    max_name_len: usize,
}

impl Registry {
    pub fn new(capacity: usize, max_name_len: usize) -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
            live: 0,
            capacity,
            max_name_len,
        }
    }

    /// Register a user under the next sequential ID.
    ///
    /// Names longer than `max_name_len - 1` characters are truncated.
    pub fn create_user(&mut self, name: &str) -> Result<UserId> {
        if self.live >= self.capacity {
            return Err(GraphError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        let keep = self.max_name_len.saturating_sub(1);
        self.users.push(User {
            id,
            name: name.chars().take(keep).collect(),
            exists: true,
        });
        self.live += 1;
        Ok(id)
    }

    pub fn exists(&self, id: UserId) -> bool {
        self.slot(id).is_some_and(|u| u.exists)
    }

    /// Fail with `NotFound` unless `id` refers to a live user.
    pub fn require(&self, id: UserId) -> Result<()> {
        if self.exists(id) {
            Ok(())
        } else {
            Err(GraphError::NotFound(id))
        }
    }

    pub fn get(&self, id: UserId) -> Result<&User> {
        self.slot(id)
            .filter(|u| u.exists)
            .ok_or(GraphError::NotFound(id))
    }

    pub fn name_of(&self, id: UserId) -> Result<&str> {
        self.get(id).map(|u| u.name.as_str())
    }

    /// Live users in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.exists)
    }

    /// Number of live users.
    pub fn count(&self) -> usize {
        self.live
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;
        self.users
            .iter()
            .map(|u| size_of::<User>() + u.name.capacity())
            .sum()
    }

    fn slot(&self, id: UserId) -> Option<&User> {
        let idx = usize::try_from(id.checked_sub(1)?).ok()?;
        self.users.get(idx)
    }
}
