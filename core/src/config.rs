//! Engine configuration.
//!
//! Limits that used to be compile-time constants are plain values here, so
//! independent graphs can run with different bounds in one process.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bounds applied by a [`SocialGraph`](crate::SocialGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Maximum number of users the registry will hold.
    #[serde(default = "default_max_users")]
    pub max_users: usize,

    /// Name buffer size; stored names keep at most `max_name_len - 1` chars.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

fn default_max_users() -> usize {
    1000
}

fn default_max_name_len() -> usize {
    64
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_users: default_max_users(),
            max_name_len: default_max_name_len(),
        }
    }
}

impl GraphConfig {
    /// Default limits with a different user capacity.
    pub fn with_max_users(max_users: usize) -> Self {
        Self {
            max_users,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_users == 0 {
            return Err(ConfigError::Invalid("max_users must be at least 1".into()));
        }
        if self.max_name_len < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_name_len must be at least 2, got {}",
                self.max_name_len
            )));
        }
        Ok(())
    }
}
