//! Soft-delete lifecycle shared by all persisted to-do records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Lifecycle state of a persisted record.
///
/// Records are never physically removed by the workflow. Deletion flips the
/// state to [`RecordState::Deleted`], which is terminal: nothing in this crate
/// moves a record back to [`RecordState::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Record is visible to active reads.
    #[default]
    Active,
    /// Record has been soft deleted.
    Deleted,
}

impl RecordState {
    /// Maps the `is_deleted` storage flag onto a lifecycle state.
    #[must_use]
    pub const fn from_deleted_flag(is_deleted: bool) -> Self {
        if is_deleted {
            Self::Deleted
        } else {
            Self::Active
        }
    }

    /// Returns `true` when the record is still active.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` when the record has been soft deleted.
    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that can be held by an entity store.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type of the record.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Human-readable record kind used in store errors and logs.
    const KIND: &'static str;

    /// Returns the record identifier.
    fn entity_id(&self) -> Self::Id;

    /// Returns the lifecycle state of the record.
    fn record_state(&self) -> RecordState;

    /// Returns `true` when the record is visible to active reads.
    fn is_active(&self) -> bool {
        self.record_state().is_active()
    }
}
