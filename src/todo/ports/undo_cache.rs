//! Port for the short-lived undo cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for undo cache operations.
pub type UndoCacheResult<T> = Result<T, UndoCacheError>;

/// Key/value store with absolute expiry.
///
/// Values are opaque JSON documents; the workflow only ever writes.
#[async_trait]
pub trait UndoCache: Send + Sync {
    /// Stores `value` under `key`, replacing any previous entry, until
    /// `expires_at`.
    async fn set(
        &self,
        key: &str,
        value: Value,
        expires_at: DateTime<Utc>,
    ) -> UndoCacheResult<()>;
}

/// Errors returned by undo cache implementations.
#[derive(Debug, Clone, Error)]
pub enum UndoCacheError {
    /// Cache backend failure.
    #[error("undo cache error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl UndoCacheError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
