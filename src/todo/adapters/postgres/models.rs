//! Diesel row models and domain mappings for to-do persistence.

use super::schema::{sub_tasks, task_groups, tasks};
use crate::todo::domain::{
    PersistedSubTaskData, PersistedTaskData, PersistedTaskGroupData, RecordState, SubTask,
    SubTaskId, Task, TaskGroup, TaskGroupId, TaskId,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Row model for subtask records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = sub_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubTaskRow {
    /// Subtask identifier.
    pub id: Uuid,
    /// Owning task identifier.
    pub task_id: Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Starred flag.
    pub is_starred: bool,
    /// Completed flag.
    pub is_completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Mutable subtask columns written on update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = sub_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct SubTaskChangeset {
    /// Owning task identifier.
    pub task_id: Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Starred flag.
    pub is_starred: bool,
    /// Completed flag.
    pub is_completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

/// Row model for task records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Owning group identifier.
    pub group_id: Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Starred flag.
    pub is_starred: bool,
    /// Completed flag.
    pub is_completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Mutable task columns written on update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Owning group identifier.
    pub group_id: Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Starred flag.
    pub is_starred: bool,
    /// Completed flag.
    pub is_completed: bool,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

/// Row model for task group records.
///
/// `created_at` is assigned by the database and only used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskGroupRow {
    /// Group identifier.
    pub id: Uuid,
    /// Group name.
    pub name: String,
    /// Display-all preference.
    pub show_all: bool,
    /// Sort order preference.
    pub sort_order: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

/// Mutable task group columns written on update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = task_groups)]
pub struct TaskGroupChangeset {
    /// Group name.
    pub name: String,
    /// Display-all preference.
    pub show_all: bool,
    /// Sort order preference.
    pub sort_order: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

impl From<&SubTask> for SubTaskRow {
    fn from(sub_task: &SubTask) -> Self {
        Self {
            id: sub_task.id().into_inner(),
            task_id: sub_task.task_id().into_inner(),
            title: sub_task.title().to_owned(),
            description: sub_task.description().map(ToOwned::to_owned),
            due_date: sub_task.due_date(),
            is_starred: sub_task.is_starred(),
            is_completed: sub_task.is_completed(),
            completed_at: sub_task.completed_at(),
            is_deleted: sub_task.state().is_deleted(),
            created_at: sub_task.created_at(),
        }
    }
}

impl From<&SubTask> for SubTaskChangeset {
    fn from(sub_task: &SubTask) -> Self {
        Self {
            task_id: sub_task.task_id().into_inner(),
            title: sub_task.title().to_owned(),
            description: sub_task.description().map(ToOwned::to_owned),
            due_date: sub_task.due_date(),
            is_starred: sub_task.is_starred(),
            is_completed: sub_task.is_completed(),
            completed_at: sub_task.completed_at(),
            is_deleted: sub_task.state().is_deleted(),
        }
    }
}

impl From<SubTaskRow> for SubTask {
    fn from(row: SubTaskRow) -> Self {
        Self::from_persisted(PersistedSubTaskData {
            id: SubTaskId::from_uuid(row.id),
            task_id: TaskId::from_uuid(row.task_id),
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            starred: row.is_starred,
            completed: row.is_completed,
            completed_at: row.completed_at,
            state: RecordState::from_deleted_flag(row.is_deleted),
            created_at: row.created_at,
        })
    }
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            group_id: task.group_id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            due_date: task.due_date(),
            is_starred: task.is_starred(),
            is_completed: task.is_completed(),
            completed_at: task.completed_at(),
            is_deleted: task.state().is_deleted(),
            created_at: task.created_at(),
        }
    }
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            group_id: task.group_id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            due_date: task.due_date(),
            is_starred: task.is_starred(),
            is_completed: task.is_completed(),
            completed_at: task.completed_at(),
            is_deleted: task.state().is_deleted(),
        }
    }
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            group_id: TaskGroupId::from_uuid(row.group_id),
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            starred: row.is_starred,
            completed: row.is_completed,
            completed_at: row.completed_at,
            state: RecordState::from_deleted_flag(row.is_deleted),
            created_at: row.created_at,
        })
    }
}

impl From<&TaskGroup> for TaskGroupRow {
    fn from(group: &TaskGroup) -> Self {
        Self {
            id: group.id().into_inner(),
            name: group.name().to_owned(),
            show_all: group.shows_all(),
            sort_order: group.sort_order().to_owned(),
            is_deleted: group.state().is_deleted(),
        }
    }
}

impl From<&TaskGroup> for TaskGroupChangeset {
    fn from(group: &TaskGroup) -> Self {
        Self {
            name: group.name().to_owned(),
            show_all: group.shows_all(),
            sort_order: group.sort_order().to_owned(),
            is_deleted: group.state().is_deleted(),
        }
    }
}

impl From<TaskGroupRow> for TaskGroup {
    fn from(row: TaskGroupRow) -> Self {
        Self::from_persisted(PersistedTaskGroupData {
            id: TaskGroupId::from_uuid(row.id),
            name: row.name,
            show_all: row.show_all,
            sort_order: row.sort_order,
            state: RecordState::from_deleted_flag(row.is_deleted),
        })
    }
}
