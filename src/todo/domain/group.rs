//! Task group aggregate.

use super::{Entity, RecordState, TaskGroupId};
use serde::{Deserialize, Serialize};

/// Named collection of tasks with display and ordering preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    id: TaskGroupId,
    name: String,
    show_all: bool,
    sort_order: String,
    state: RecordState,
}

/// Parameter object for reconstructing a persisted task group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskGroupData {
    /// Persisted group identifier.
    pub id: TaskGroupId,
    /// Persisted group name.
    pub name: String,
    /// Persisted display-all preference.
    pub show_all: bool,
    /// Persisted sort order preference.
    pub sort_order: String,
    /// Persisted lifecycle state.
    pub state: RecordState,
}

impl TaskGroup {
    /// Creates a new active group that shows all of its tasks.
    #[must_use]
    pub fn new(name: impl Into<String>, sort_order: impl Into<String>) -> Self {
        Self {
            id: TaskGroupId::new(),
            name: name.into(),
            show_all: true,
            sort_order: sort_order.into(),
            state: RecordState::Active,
        }
    }

    /// Sets the display-all preference.
    #[must_use]
    pub const fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    /// Reconstructs a group from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskGroupData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            show_all: data.show_all,
            sort_order: data.sort_order,
            state: data.state,
        }
    }

    /// Returns the group identifier.
    #[must_use]
    pub const fn id(&self) -> TaskGroupId {
        self.id
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when the group shows all of its tasks.
    #[must_use]
    pub const fn shows_all(&self) -> bool {
        self.show_all
    }

    /// Returns the sort order preference.
    #[must_use]
    pub fn sort_order(&self) -> &str {
        &self.sort_order
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RecordState {
        self.state
    }

    /// Soft deletes the group.
    pub const fn soft_delete(&mut self) {
        self.state = RecordState::Deleted;
    }
}

impl Entity for TaskGroup {
    type Id = TaskGroupId;

    const KIND: &'static str = "task group";

    fn entity_id(&self) -> TaskGroupId {
        self.id
    }

    fn record_state(&self) -> RecordState {
        self.state
    }
}
