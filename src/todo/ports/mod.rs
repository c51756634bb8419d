//! Port contracts for the subtask workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by the workflow
//! service.

pub mod store;
pub mod undo_cache;

pub use store::{EntityStore, EntityStoreError, EntityStoreResult};
pub use undo_cache::{UndoCache, UndoCacheError, UndoCacheResult};
