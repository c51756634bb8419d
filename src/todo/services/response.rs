//! Uniform response envelope returned by workflow operations.

use serde::{Deserialize, Serialize};

/// Outcome of a workflow operation as seen by the request-handling layer.
///
/// Expected domain failures such as a missing subtask are reported with
/// `is_success == false` and a message; infrastructure faults are returned as
/// errors instead.
///
/// # Examples
///
/// ```
/// use todo_core::todo::services::WorkflowResponse;
///
/// let response = WorkflowResponse::<()>::failure("Subtask not found");
/// assert!(!response.is_success);
/// assert_eq!(
///     serde_json::to_value(&response).ok(),
///     Some(serde_json::json!({
///         "isSuccess": false,
///         "message": "Subtask not found",
///         "data": null
///     })),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResponse<T> {
    /// Whether the operation succeeded.
    pub is_success: bool,
    /// Human-readable outcome message, possibly empty.
    pub message: String,
    /// Operation payload, if any.
    pub data: Option<T>,
}

impl<T> WorkflowResponse<T> {
    /// Builds a successful response carrying `data`.
    #[must_use]
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Builds a successful response with no payload.
    #[must_use]
    pub fn success_without_data(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Builds a failed response with no payload.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            data: None,
        }
    }
}
