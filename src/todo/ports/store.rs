//! Generic persistence port for to-do records.

use crate::todo::domain::Entity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for entity store operations.
pub type EntityStoreResult<T> = Result<T, EntityStoreError>;

/// Persistence contract for a single record type.
///
/// Stores return soft-deleted records like any other; filtering on
/// [`Entity::is_active`] is the caller's responsibility.
#[async_trait]
pub trait EntityStore<T>: Send + Sync
where
    T: Entity,
{
    /// Finds a record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: T::Id) -> EntityStoreResult<Option<T>>;

    /// Stores a new record and returns it as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`EntityStoreError::DuplicateEntity`] when a record with the
    /// same identifier already exists.
    async fn add(&self, entity: T) -> EntityStoreResult<T>;

    /// Persists changes to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`EntityStoreError::NotFound`] when the record does not exist.
    async fn update(&self, entity: &T) -> EntityStoreResult<()>;

    /// Returns every stored record in store-native order.
    async fn query_all(&self) -> EntityStoreResult<Vec<T>>;
}

/// Errors returned by entity store implementations.
#[derive(Debug, Clone, Error)]
pub enum EntityStoreError {
    /// A record with the same identifier already exists.
    #[error("duplicate {kind} identifier: {id}")]
    DuplicateEntity {
        /// Record kind.
        kind: &'static str,
        /// Conflicting identifier.
        id: String,
    },

    /// The record was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind.
        kind: &'static str,
        /// Missing identifier.
        id: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EntityStoreError {
    /// Builds a duplicate-record error for `T`.
    pub fn duplicate<T: Entity>(id: T::Id) -> Self {
        Self::DuplicateEntity {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    /// Builds a missing-record error for `T`.
    pub fn not_found<T: Entity>(id: T::Id) -> Self {
        Self::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
