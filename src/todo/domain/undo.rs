//! Transient undo payloads written to the undo cache.

use super::{SubTaskId, TaskGroupId, TaskId};
use serde::{Deserialize, Serialize};

/// Subtasks removed by the most recent delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoDeleteItem {
    /// Identifiers of the soft-deleted subtasks.
    pub sub_task_ids: Vec<SubTaskId>,
}

/// Enough state to reverse a subtask-to-task move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoSubTaskMoved {
    /// The subtask that was soft deleted by the move.
    pub sub_task_id: SubTaskId,
    /// The task created from the subtask.
    pub task_id: TaskId,
    /// The group that received the new task.
    pub moved_group_id: TaskGroupId,
    /// `false` when the move created the group, which an undo must remove.
    pub group_existed: bool,
}

/// Payload stored under an undo cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UndoRecord {
    /// Recently deleted subtasks.
    DeletedItems(UndoDeleteItem),
    /// Recently moved subtask.
    SubTaskMoved(UndoSubTaskMoved),
}
