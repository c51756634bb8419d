//! Subtask aggregate.

use super::{Entity, RecordState, SubTaskId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Child work item belonging to a parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    id: SubTaskId,
    task_id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    starred: bool,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    state: RecordState,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubTaskData {
    /// Persisted subtask identifier.
    pub id: SubTaskId,
    /// Owning task identifier.
    pub task_id: TaskId,
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

impl SubTask {
    /// Creates a new active, incomplete subtask under the given task.
    #[must_use]
    pub fn new(task_id: TaskId, title: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: SubTaskId::new(),
            task_id,
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

    /// Reconstructs a subtask from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubTaskData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
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

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubTaskId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
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

    /// Returns `true` when the subtask is starred.
    #[must_use]
    pub const fn is_starred(&self) -> bool {
        self.starred
    }

    /// Returns `true` when the subtask is completed.
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

    /// Inverts the starred flag.
    pub const fn toggle_star(&mut self) {
        self.starred = !self.starred;
    }

    /// Overwrites the editable details.
    ///
    /// The completion timestamp is re-derived from the completed flag on
    /// every edit: a completed subtask is re-stamped with the current time
    /// and an incomplete one has its timestamp cleared.
    pub fn edit_details(
        &mut self,
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) {
        self.title = title;
        self.description = description;
        self.due_date = due_date;
        self.completed_at = self.completed.then(|| clock.utc());
    }

    /// Marks the subtask completed and stamps the completion time.
    pub fn mark_completed(&mut self, clock: &impl Clock) {
        self.completed = true;
        self.completed_at = Some(clock.utc());
    }

    /// Marks the subtask incomplete and clears the completion time.
    pub const fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    /// Soft deletes the subtask.
    pub const fn soft_delete(&mut self) {
        self.state = RecordState::Deleted;
    }
}

impl Entity for SubTask {
    type Id = SubTaskId;

    const KIND: &'static str = "subtask";

    fn entity_id(&self) -> SubTaskId {
        self.id
    }

    fn record_state(&self) -> RecordState {
        self.state
    }
}
