//! Error taxonomy for graph and configuration operations.

use std::collections::TryReserveError;

use crate::registry::UserId;

/// Result alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Recoverable failures surfaced to the caller. None of these leave the
/// graph in a partially mutated state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The referenced user was never created.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// An edge operation named the same user on both ends.
    #[error("user {0} cannot befriend themselves")]
    SelfLoop(UserId),

    /// User creation refused because the registry is full.
    #[error("user capacity of {capacity} reached")]
    CapacityExceeded { capacity: usize },

    /// Reserving adjacency storage failed before any mutation took place.
    #[error("adjacency allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),
}

/// Failures while loading or validating a [`GraphConfig`](crate::GraphConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
