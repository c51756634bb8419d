//! Task aggregate.

use super::{Entity, RecordState, SubTask, TaskGroupId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Work item belonging to a task group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    group_id: TaskGroupId,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    starred: bool,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    state: RecordState,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning group identifier.
    pub group_id: TaskGroupId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted starred flag.
    pub starred: bool,
    /// Persisted completed flag.
    pub completed: bool,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted lifecycle state.
    pub state: RecordState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active, incomplete task in the given group.
    #[must_use]
    pub fn new(group_id: TaskGroupId, title: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            group_id,
            title: title.into(),
            description: None,
            due_date: None,
            starred: false,
            completed: false,
            completed_at: None,
            state: RecordState::Active,
            created_at: clock.utc(),
        }
    }

    /// Promotes a subtask into a new task in `group_id`.
    ///
    /// Descriptive fields and completion status are copied; the new task gets
    /// a fresh identifier and creation timestamp.
    #[must_use]
    pub fn from_subtask(sub_task: &SubTask, group_id: TaskGroupId, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            group_id,
            title: sub_task.title().to_owned(),
            description: sub_task.description().map(ToOwned::to_owned),
            due_date: sub_task.due_date(),
            starred: sub_task.is_starred(),
            completed: sub_task.is_completed(),
            completed_at: sub_task.completed_at(),
            state: RecordState::Active,
            created_at: clock.utc(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the starred flag.
    #[must_use]
    pub const fn with_starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            group_id: data.group_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            starred: data.starred,
            completed: data.completed,
            completed_at: data.completed_at,
            state: data.state,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning group identifier.
    #[must_use]
    pub const fn group_id(&self) -> TaskGroupId {
        self.group_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns `true` when the task is starred.
    #[must_use]
    pub const fn is_starred(&self) -> bool {
        self.starred
    }

    /// Returns `true` when the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RecordState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the task completed and stamps the completion time.
    pub fn mark_completed(&mut self, clock: &impl Clock) {
        self.completed = true;
        self.completed_at = Some(clock.utc());
    }

    /// Reopens a completed task, clearing its completion time.
    pub const fn reopen(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    /// Soft deletes the task.
    pub const fn soft_delete(&mut self) {
        self.state = RecordState::Deleted;
    }
}

impl Entity for Task {
    type Id = TaskId;

    const KIND: &'static str = "task";

    fn entity_id(&self) -> TaskId {
        self.id
    }

    fn record_state(&self) -> RecordState {
        self.state
    }
}
