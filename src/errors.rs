use crate::models::TaskId;
use axum::http::StatusCode;

/// Failure of a single checklist operation. None of these leave the current
/// list half-updated.
#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    #[error("task index {index} is out of range for a list of {len}")]
    Index { index: usize, len: usize },
    #[error("no task with id {0} in the current list")]
    UnknownTask(TaskId),
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl ChecklistError {
    pub fn storage(err: impl std::error::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ChecklistError> for AppError {
    fn from(err: ChecklistError) -> Self {
        let status = match err {
            ChecklistError::Index { .. } | ChecklistError::UnknownTask(_) => StatusCode::NOT_FOUND,
            ChecklistError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            ChecklistError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
