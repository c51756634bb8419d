//! In-memory adapters for the subtask workflow ports.

mod store;
mod undo_cache;

pub use store::InMemoryEntityStore;
pub use undo_cache::InMemoryUndoCache;
