//! In-memory undo cache with absolute expiry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::todo::ports::{UndoCache, UndoCacheError, UndoCacheResult};

/// Thread-safe in-memory key/value cache.
///
/// Expired entries are invisible to [`InMemoryUndoCache::get`] and are
/// dropped lazily by [`InMemoryUndoCache::purge_expired`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryUndoCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

impl InMemoryUndoCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key` if it has not expired at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`UndoCacheError::Backend`] when the cache lock is poisoned.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> UndoCacheResult<Option<Value>> {
        let entries = self.entries.read().map_err(|err| {
            UndoCacheError::backend(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    /// Returns the expiry recorded for `key`, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`UndoCacheError::Backend`] when the cache lock is poisoned.
    pub fn expiry_of(&self, key: &str) -> UndoCacheResult<Option<DateTime<Utc>>> {
        let entries = self.entries.read().map_err(|err| {
            UndoCacheError::backend(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.get(key).map(|entry| entry.expires_at))
    }

    /// Drops every entry that has expired at `now` and returns how many were
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`UndoCacheError::Backend`] when the cache lock is poisoned.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> UndoCacheResult<usize> {
        let mut entries = self.entries.write().map_err(|err| {
            UndoCacheError::backend(std::io::Error::other(err.to_string()))
        })?;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before - entries.len())
    }
}

#[async_trait]
impl UndoCache for InMemoryUndoCache {
    async fn set(
        &self,
        key: &str,
        value: Value,
        expires_at: DateTime<Utc>,
    ) -> UndoCacheResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            UndoCacheError::backend(std::io::Error::other(err.to_string()))
        })?;
        entries.insert(key.to_owned(), CacheEntry { value, expires_at });
        Ok(())
    }
}
