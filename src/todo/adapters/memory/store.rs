//! In-memory entity store for workflow tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::todo::{
    domain::Entity,
    ports::{EntityStore, EntityStoreError, EntityStoreResult},
};

/// Thread-safe in-memory store preserving insertion order.
pub struct InMemoryEntityStore<T: Entity> {
    state: Arc<RwLock<InMemoryStoreState<T>>>,
}

struct InMemoryStoreState<T: Entity> {
    records: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Entity> InMemoryEntityStore<T> {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState {
                records: Vec::new(),
                index: HashMap::new(),
            })),
        }
    }

    /// Returns the number of stored records, soft-deleted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    /// Returns `true` when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for InMemoryEntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for InMemoryEntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Entity> fmt::Debug for InMemoryEntityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryEntityStore")
            .field("kind", &T::KIND)
            .field("len", &self.len())
            .finish()
    }
}

fn lock_error<G>(err: &PoisonError<G>) -> EntityStoreError {
    EntityStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<T: Entity> EntityStore<T> for InMemoryEntityStore<T> {
    async fn find_by_id(&self, id: T::Id) -> EntityStoreResult<Option<T>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .index
            .get(&id)
            .and_then(|position| state.records.get(*position))
            .cloned())
    }

    async fn add(&self, entity: T) -> EntityStoreResult<T> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let id = entity.entity_id();
        if state.index.contains_key(&id) {
            return Err(EntityStoreError::duplicate::<T>(id));
        }

        let position = state.records.len();
        state.records.push(entity.clone());
        state.index.insert(id, position);
        Ok(entity)
    }

    async fn update(&self, entity: &T) -> EntityStoreResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let id = entity.entity_id();
        let position = *state
            .index
            .get(&id)
            .ok_or_else(|| EntityStoreError::not_found::<T>(id))?;
        let slot = state
            .records
            .get_mut(position)
            .ok_or_else(|| EntityStoreError::not_found::<T>(id))?;
        *slot = entity.clone();
        Ok(())
    }

    async fn query_all(&self) -> EntityStoreResult<Vec<T>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.records.clone())
    }
}
