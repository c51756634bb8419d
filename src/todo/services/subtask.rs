//! Service layer for subtask editing, completion, deletion, and moves.

use crate::config::WorkflowConfig;
use crate::todo::{
    domain::{
        Entity, SubTask, SubTaskId, Task, TaskGroup, TaskGroupId, TaskId, UndoDeleteItem,
        UndoRecord, UndoSubTaskMoved,
    },
    ports::{EntityStore, EntityStoreError, UndoCache, UndoCacheError},
    services::WorkflowResponse,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Message returned when a subtask is missing or soft deleted.
pub const SUBTASK_NOT_FOUND: &str = "Subtask not found";
/// Message returned when a subtask's parent task is missing or soft deleted.
pub const PARENT_TASK_NOT_FOUND: &str = "Parent Task is not found";
/// Message returned when a destination group is missing or soft deleted.
pub const GROUP_NOT_FOUND: &str = "Group not found";

const SUBTASK_ADDED: &str = "Subtask added successfully!!";
const SUBTASK_DELETED: &str = "Subtask deleted successfully";
const SUBTASK_STAR_UPDATED: &str = "Subtask starred status updated successfully";
const SUBTASK_UPDATED: &str = "Subtask updated successfully!!";
const SUBTASK_COMPLETION_UPDATED: &str = "Subtask completion status updated successfully";
const SUBTASK_MOVED_TO_EXISTING_GROUP: &str = "Subtask moved to existing group successfully!!";
const SUBTASK_MOVED_TO_NEW_GROUP: &str = "Subtask moved to new group successfully!!";

/// Request payload for adding a subtask to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSubTaskRequest {
    task_id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    starred: bool,
}

impl AddSubTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(task_id: TaskId, title: impl Into<String>) -> Self {
        Self {
            task_id,
            title: title.into(),
            description: None,
            due_date: None,
            starred: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the starred flag.
    #[must_use]
    pub const fn with_starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }
}

/// Request payload for editing a subtask's details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSubTaskRequest {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl UpdateSubTaskRequest {
    /// Creates a request that sets the title and clears the optional fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request payload for moving a subtask into a newly created group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveToNewGroupRequest {
    group_name: String,
}

impl MoveToNewGroupRequest {
    /// Creates a request naming the group to create.
    #[must_use]
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
        }
    }
}

/// Projection of a subtask returned by [`SubTaskService::get_by_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTaskView {
    /// Subtask title.
    pub title: String,
    /// Subtask identifier.
    pub sub_task_id: SubTaskId,
    /// Subtask description, if any.
    pub description: Option<String>,
    /// Owning task identifier.
    pub task_id: TaskId,
    /// Due date formatted as `YYYY-MM-DD`, if any.
    pub due_date: Option<String>,
}

impl From<&SubTask> for SubTaskView {
    fn from(sub_task: &SubTask) -> Self {
        Self {
            title: sub_task.title().to_owned(),
            sub_task_id: sub_task.id(),
            description: sub_task.description().map(ToOwned::to_owned),
            task_id: sub_task.task_id(),
            due_date: sub_task
                .due_date()
                .map(|due| due.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Infrastructure failures surfaced by [`SubTaskService`].
///
/// Missing records are not errors; they are reported through
/// [`WorkflowResponse::failure`].
#[derive(Debug, Error)]
pub enum SubTaskServiceError {
    /// Entity store operation failed.
    #[error(transparent)]
    Store(#[from] EntityStoreError),
    /// Undo cache write failed.
    #[error(transparent)]
    UndoCache(#[from] UndoCacheError),
    /// Undo record could not be encoded for the cache.
    #[error("failed to encode undo record: {0}")]
    UndoEncoding(#[from] serde_json::Error),
    /// The configured undo window pushes the expiry past the representable
    /// range; raised before any write.
    #[error("undo window of {undo_ttl} overflows the undo expiry")]
    UndoExpiryOverflow {
        /// Configured undo window.
        undo_ttl: TimeDelta,
    },
}

/// Result type for subtask service operations.
pub type SubTaskServiceResult<T> = Result<WorkflowResponse<T>, SubTaskServiceError>;

/// Subtask workflow orchestration service.
///
/// Each operation is a sequence of independent store writes; moves create the
/// new task before soft deleting the subtask, so a failure between the two
/// leaves both records active.
pub struct SubTaskService<S, T, G, U, C>
where
    S: EntityStore<SubTask>,
    T: EntityStore<Task>,
    G: EntityStore<TaskGroup>,
    U: UndoCache,
    C: Clock + Send + Sync,
{
    sub_tasks: Arc<S>,
    tasks: Arc<T>,
    groups: Arc<G>,
    undo_cache: Arc<U>,
    clock: Arc<C>,
    config: WorkflowConfig,
}

impl<S, T, G, U, C> Clone for SubTaskService<S, T, G, U, C>
where
    S: EntityStore<SubTask>,
    T: EntityStore<Task>,
    G: EntityStore<TaskGroup>,
    U: UndoCache,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            sub_tasks: Arc::clone(&self.sub_tasks),
            tasks: Arc::clone(&self.tasks),
            groups: Arc::clone(&self.groups),
            undo_cache: Arc::clone(&self.undo_cache),
            clock: Arc::clone(&self.clock),
            config: self.config.clone(),
        }
    }
}

impl<S, T, G, U, C> SubTaskService<S, T, G, U, C>
where
    S: EntityStore<SubTask>,
    T: EntityStore<Task>,
    G: EntityStore<TaskGroup>,
    U: UndoCache,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default [`WorkflowConfig`].
    #[must_use]
    pub fn new(
        sub_tasks: Arc<S>,
        tasks: Arc<T>,
        groups: Arc<G>,
        undo_cache: Arc<U>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            sub_tasks,
            tasks,
            groups,
            undo_cache,
            clock,
            config: WorkflowConfig::default(),
        }
    }

    /// Replaces the workflow configuration.
    #[must_use]
    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    async fn find_active_sub_task(
        &self,
        id: SubTaskId,
    ) -> Result<Option<SubTask>, SubTaskServiceError> {
        let found = self.sub_tasks.find_by_id(id).await?;
        Ok(found.filter(|sub_task| sub_task.is_active()))
    }

    /// Expiry for an undo record written now. Callers resolve it before
    /// their first store write.
    fn undo_expiry(&self) -> Result<DateTime<Utc>, SubTaskServiceError> {
        let undo_ttl = self.config.undo_ttl;
        self.clock
            .utc()
            .checked_add_signed(undo_ttl)
            .ok_or(SubTaskServiceError::UndoExpiryOverflow { undo_ttl })
    }

    async fn remember(
        &self,
        key: &str,
        record: &UndoRecord,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SubTaskServiceError> {
        let value = serde_json::to_value(record)?;
        self.undo_cache.set(key, value, expires_at).await?;
        Ok(())
    }

    /// Adds a new, incomplete subtask.
    ///
    /// The response carries every stored subtask, soft-deleted ones included.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError::Store`] when persistence fails.
    pub async fn add(&self, request: AddSubTaskRequest) -> SubTaskServiceResult<Vec<SubTask>> {
        let sub_task = SubTask::new(request.task_id, request.title, &*self.clock)
            .with_description(request.description)
            .with_due_date(request.due_date)
            .with_starred(request.starred);
        let stored = self.sub_tasks.add(sub_task).await?;
        info!(sub_task_id = %stored.id(), task_id = %stored.task_id(), "subtask added");

        let all = self.sub_tasks.query_all().await?;
        Ok(WorkflowResponse::success(SUBTASK_ADDED, all))
    }

    /// Soft deletes a subtask and records it for undo.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError`] when persistence or the undo cache
    /// fails, or [`SubTaskServiceError::UndoExpiryOverflow`] before any write
    /// when the undo window cannot be added to the current time.
    pub async fn delete(&self, id: SubTaskId) -> SubTaskServiceResult<()> {
        let Some(mut sub_task) = self.find_active_sub_task(id).await? else {
            warn!(sub_task_id = %id, "delete rejected: subtask not found");
            return Ok(WorkflowResponse::failure(SUBTASK_NOT_FOUND));
        };

        let expires_at = self.undo_expiry()?;
        sub_task.soft_delete();
        self.sub_tasks.update(&sub_task).await?;
        let record = UndoRecord::DeletedItems(UndoDeleteItem {
            sub_task_ids: vec![id],
        });
        self.remember(&self.config.undo_items_key, &record, expires_at)
            .await?;

        info!(sub_task_id = %id, "subtask deleted");
        Ok(WorkflowResponse::success_without_data(SUBTASK_DELETED))
    }

    /// Lists every active subtask in store order.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError::Store`] when persistence fails.
    pub async fn list_active(&self) -> SubTaskServiceResult<Vec<SubTask>> {
        let active: Vec<SubTask> = self
            .sub_tasks
            .query_all()
            .await?
            .into_iter()
            .filter(|sub_task| sub_task.is_active())
            .collect();
        debug!(count = active.len(), "listed active subtasks");
        Ok(WorkflowResponse::success(String::new(), active))
    }

    /// Returns a projected view of an active subtask.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError::Store`] when persistence fails.
    pub async fn get_by_id(&self, id: SubTaskId) -> SubTaskServiceResult<SubTaskView> {
        let Some(sub_task) = self.find_active_sub_task(id).await? else {
            debug!(sub_task_id = %id, "subtask lookup missed");
            return Ok(WorkflowResponse::failure(SUBTASK_NOT_FOUND));
        };
        Ok(WorkflowResponse::success(
            String::new(),
            SubTaskView::from(&sub_task),
        ))
    }

    /// Inverts the starred flag of an active subtask.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError::Store`] when persistence fails.
    pub async fn toggle_star(&self, id: SubTaskId) -> SubTaskServiceResult<SubTask> {
        let Some(mut sub_task) = self.find_active_sub_task(id).await? else {
            warn!(sub_task_id = %id, "star toggle rejected: subtask not found");
            return Ok(WorkflowResponse::failure(SUBTASK_NOT_FOUND));
        };

        sub_task.toggle_star();
        self.sub_tasks.update(&sub_task).await?;
        info!(sub_task_id = %id, starred = sub_task.is_starred(), "subtask star toggled");
        Ok(WorkflowResponse::success(SUBTASK_STAR_UPDATED, sub_task))
    }

    /// Overwrites the title, description, and due date of an active subtask.
    ///
    /// The completion timestamp is re-derived as a side effect; see
    /// [`SubTask::edit_details`].
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError::Store`] when persistence fails.
    pub async fn update(
        &self,
        id: SubTaskId,
        request: UpdateSubTaskRequest,
    ) -> SubTaskServiceResult<SubTask> {
        let Some(mut sub_task) = self.find_active_sub_task(id).await? else {
            warn!(sub_task_id = %id, "update rejected: subtask not found");
            return Ok(WorkflowResponse::failure(SUBTASK_NOT_FOUND));
        };

        sub_task.edit_details(
            request.title,
            request.description,
            request.due_date,
            &*self.clock,
        );
        self.sub_tasks.update(&sub_task).await?;
        info!(sub_task_id = %id, "subtask updated");
        Ok(WorkflowResponse::success(SUBTASK_UPDATED, sub_task))
    }

    /// Flips the completion status of an active subtask.
    ///
    /// Reopening a subtask whose parent task is completed reopens the parent
    /// too. The parent is written first.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError::Store`] when persistence fails.
    pub async fn toggle_completion(&self, id: SubTaskId) -> SubTaskServiceResult<()> {
        let Some(mut sub_task) = self.find_active_sub_task(id).await? else {
            warn!(sub_task_id = %id, "completion toggle rejected: subtask not found");
            return Ok(WorkflowResponse::failure(SUBTASK_NOT_FOUND));
        };
        let parent = self.tasks.find_by_id(sub_task.task_id()).await?;
        let Some(mut parent) = parent.filter(|task| task.is_active()) else {
            warn!(
                sub_task_id = %id,
                task_id = %sub_task.task_id(),
                "completion toggle rejected: parent task not found"
            );
            return Ok(WorkflowResponse::failure(PARENT_TASK_NOT_FOUND));
        };

        if sub_task.is_completed() {
            sub_task.mark_incomplete();
            if parent.is_completed() {
                parent.reopen();
                self.tasks.update(&parent).await?;
                info!(task_id = %parent.id(), "parent task reopened");
            }
        } else {
            sub_task.mark_completed(&*self.clock);
        }
        self.sub_tasks.update(&sub_task).await?;

        info!(
            sub_task_id = %id,
            completed = sub_task.is_completed(),
            "subtask completion toggled"
        );
        Ok(WorkflowResponse::success_without_data(
            SUBTASK_COMPLETION_UPDATED,
        ))
    }

    /// Promotes an active subtask into a task of an existing group.
    ///
    /// No writes happen when either the subtask or the group is missing.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError`] when persistence or the undo cache
    /// fails.
    pub async fn move_to_existing_group(
        &self,
        id: SubTaskId,
        group_id: TaskGroupId,
    ) -> SubTaskServiceResult<()> {
        let Some(sub_task) = self.find_active_sub_task(id).await? else {
            warn!(sub_task_id = %id, "move rejected: subtask not found");
            return Ok(WorkflowResponse::failure(SUBTASK_NOT_FOUND));
        };
        let group = self.groups.find_by_id(group_id).await?;
        if !group.is_some_and(|found| found.is_active()) {
            warn!(sub_task_id = %id, group_id = %group_id, "move rejected: group not found");
            return Ok(WorkflowResponse::failure(GROUP_NOT_FOUND));
        }

        let expires_at = self.undo_expiry()?;
        self.promote_to_task(sub_task, group_id, true, expires_at)
            .await?;
        Ok(WorkflowResponse::success_without_data(
            SUBTASK_MOVED_TO_EXISTING_GROUP,
        ))
    }

    /// Creates a group and promotes an active subtask into a task within it.
    ///
    /// # Errors
    ///
    /// Returns [`SubTaskServiceError`] when persistence or the undo cache
    /// fails.
    pub async fn move_to_new_group(
        &self,
        id: SubTaskId,
        request: MoveToNewGroupRequest,
    ) -> SubTaskServiceResult<()> {
        let Some(sub_task) = self.find_active_sub_task(id).await? else {
            warn!(sub_task_id = %id, "move rejected: subtask not found");
            return Ok(WorkflowResponse::failure(SUBTASK_NOT_FOUND));
        };

        let expires_at = self.undo_expiry()?;
        let new_group = TaskGroup::new(
            request.group_name,
            self.config.default_group_sort_order.as_str(),
        );
        let group = self.groups.add(new_group).await?;
        info!(group_id = %group.id(), name = group.name(), "group created for moved subtask");

        self.promote_to_task(sub_task, group.id(), false, expires_at)
            .await?;
        Ok(WorkflowResponse::success_without_data(
            SUBTASK_MOVED_TO_NEW_GROUP,
        ))
    }

    async fn promote_to_task(
        &self,
        mut sub_task: SubTask,
        group_id: TaskGroupId,
        group_existed: bool,
        expires_at: DateTime<Utc>,
    ) -> Result<Task, SubTaskServiceError> {
        let promoted = Task::from_subtask(&sub_task, group_id, &*self.clock);
        let task = self.tasks.add(promoted).await?;

        sub_task.soft_delete();
        self.sub_tasks.update(&sub_task).await?;

        let record = UndoRecord::SubTaskMoved(UndoSubTaskMoved {
            sub_task_id: sub_task.id(),
            task_id: task.id(),
            moved_group_id: group_id,
            group_existed,
        });
        self.remember(&self.config.undo_subtask_moved_key, &record, expires_at)
            .await?;

        info!(
            sub_task_id = %sub_task.id(),
            task_id = %task.id(),
            group_id = %group_id,
            group_existed,
            "subtask moved to group"
        );
        Ok(task)
    }
}
