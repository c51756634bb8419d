//! Application services for the subtask workflow.

mod response;
mod subtask;

pub use response::WorkflowResponse;
pub use subtask::{
    AddSubTaskRequest, GROUP_NOT_FOUND, MoveToNewGroupRequest, PARENT_TASK_NOT_FOUND,
    SUBTASK_NOT_FOUND, SubTaskService, SubTaskServiceError, SubTaskServiceResult, SubTaskView,
    UpdateSubTaskRequest,
};
