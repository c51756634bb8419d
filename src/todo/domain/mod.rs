//! Domain model for subtasks, tasks, and task groups.
//!
//! Records carry an explicit [`RecordState`] instead of a raw soft-delete
//! flag. Every timestamp is read from an injected [`mockable::Clock`].

mod group;
mod ids;
mod lifecycle;
mod subtask;
mod task;
mod undo;

pub use group::{PersistedTaskGroupData, TaskGroup};
pub use ids::{SubTaskId, TaskGroupId, TaskId};
pub use lifecycle::{Entity, RecordState};
pub use subtask::{PersistedSubTaskData, SubTask};
pub use task::{PersistedTaskData, Task};
pub use undo::{UndoDeleteItem, UndoRecord, UndoSubTaskMoved};
