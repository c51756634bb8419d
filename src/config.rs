//! Runtime configuration for the subtask workflow.
//!
//! Values default to the behaviour expected by the to-do front end and can be
//! overridden through `TODO_*` environment variables.

use chrono::TimeDelta;
use thiserror::Error;

/// Environment variable holding the undo window in seconds.
pub const UNDO_TTL_SECS_VAR: &str = "TODO_UNDO_TTL_SECS";
/// Environment variable holding the cache key for deleted-item undo records.
pub const UNDO_ITEMS_KEY_VAR: &str = "TODO_UNDO_ITEMS_KEY";
/// Environment variable holding the cache key for moved-subtask undo records.
pub const UNDO_SUBTASK_MOVED_KEY_VAR: &str = "TODO_UNDO_SUBTASK_MOVED_KEY";
/// Environment variable holding the sort order given to new groups.
pub const DEFAULT_GROUP_SORT_ORDER_VAR: &str = "TODO_DEFAULT_GROUP_SORT_ORDER";

/// Default undo window in seconds.
pub const DEFAULT_UNDO_TTL_SECS: u32 = 3;
/// Default cache key for deleted-item undo records.
pub const DEFAULT_UNDO_ITEMS_KEY: &str = "undo_items";
/// Default cache key for moved-subtask undo records.
pub const DEFAULT_UNDO_SUBTASK_MOVED_KEY: &str = "undo_subtask_moved";
/// Sort order assigned to groups created by the workflow.
pub const DEFAULT_GROUP_SORT_ORDER: &str = "My order";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was present but could not be parsed.
    #[error("invalid value '{value}' for {variable}: {reason}")]
    InvalidValue {
        /// Variable name.
        variable: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Configuration consumed by [`crate::todo::services::SubTaskService`].
///
/// # Examples
///
/// ```
/// use todo_core::config::WorkflowConfig;
///
/// let config = WorkflowConfig::default();
/// assert_eq!(config.undo_ttl.num_seconds(), 3);
/// assert_eq!(config.default_group_sort_order, "My order");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// How long undo records stay in the cache.
    pub undo_ttl: TimeDelta,
    /// Cache key for deleted-item undo records.
    pub undo_items_key: String,
    /// Cache key for moved-subtask undo records.
    pub undo_subtask_moved_key: String,
    /// Sort order given to groups created by a move.
    pub default_group_sort_order: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            undo_ttl: TimeDelta::seconds(i64::from(DEFAULT_UNDO_TTL_SECS)),
            undo_items_key: DEFAULT_UNDO_ITEMS_KEY.to_owned(),
            undo_subtask_moved_key: DEFAULT_UNDO_SUBTASK_MOVED_KEY.to_owned(),
            default_group_sort_order: DEFAULT_GROUP_SORT_ORDER.to_owned(),
        }
    }
}

impl WorkflowConfig {
    /// Sets the undo window.
    #[must_use]
    pub const fn with_undo_ttl(mut self, undo_ttl: TimeDelta) -> Self {
        self.undo_ttl = undo_ttl;
        self
    }

    /// Sets the cache key for deleted-item undo records.
    #[must_use]
    pub fn with_undo_items_key(mut self, key: impl Into<String>) -> Self {
        self.undo_items_key = key.into();
        self
    }

    /// Sets the cache key for moved-subtask undo records.
    #[must_use]
    pub fn with_undo_subtask_moved_key(mut self, key: impl Into<String>) -> Self {
        self.undo_subtask_moved_key = key.into();
        self
    }

    /// Sets the sort order given to new groups.
    #[must_use]
    pub fn with_default_group_sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.default_group_sort_order = sort_order.into();
        self
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the undo window is not a
    /// positive whole number of seconds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |variable: &str| {
            lookup(variable)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(raw_ttl) = read(UNDO_TTL_SECS_VAR) {
            config.undo_ttl = parse_ttl(&raw_ttl)?;
        }
        if let Some(key) = read(UNDO_ITEMS_KEY_VAR) {
            config.undo_items_key = key;
        }
        if let Some(key) = read(UNDO_SUBTASK_MOVED_KEY_VAR) {
            config.undo_subtask_moved_key = key;
        }
        if let Some(sort_order) = read(DEFAULT_GROUP_SORT_ORDER_VAR) {
            config.default_group_sort_order = sort_order;
        }
        Ok(config)
    }
}

fn parse_ttl(raw: &str) -> Result<TimeDelta, ConfigError> {
    let invalid = |reason| ConfigError::InvalidValue {
        variable: UNDO_TTL_SECS_VAR,
        value: raw.to_owned(),
        reason,
    };
    let seconds: u32 = raw
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if seconds == 0 {
        return Err(invalid("undo window must be at least one second"));
    }
    Ok(TimeDelta::seconds(i64::from(seconds)))
}
