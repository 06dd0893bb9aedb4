use serde::Serialize;
use thiserror::Error;

/// Structured error type for the editor. Callers can match on the error code
/// (the JSON output of the CLI carries it as `code`).
#[derive(Debug, Clone, Serialize, Error)]
#[serde(tag = "code", content = "detail")]
pub enum AppError {
    #[error("{what} not found")]
    NotFound { what: String },
    #[error("Invalid {what} index: {index}")]
    InvalidIndex { what: String, index: usize },
    #[error("{message}")]
    ValidationError { message: String },
    #[error("I/O error: {message}")]
    IoError { message: String },
    #[error("Layout error: {message}")]
    LayoutError { message: String },
    #[error("No session loaded (run `init` first)")]
    NoSession,
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoError {
            message: e.to_string(),
        }
    }
}

impl From<crate::store::StoreError> for AppError {
    fn from(e: crate::store::StoreError) -> Self {
        match e {
            crate::store::StoreError::Io(io_err) => AppError::IoError {
                message: io_err.to_string(),
            },
            crate::store::StoreError::Json(json_err) => AppError::ValidationError {
                message: json_err.to_string(),
            },
            crate::store::StoreError::Invalid(msg) => AppError::ValidationError { message: msg },
        }
    }
}

impl From<crate::layout::LayoutError> for AppError {
    fn from(e: crate::layout::LayoutError) -> Self {
        AppError::LayoutError {
            message: e.to_string(),
        }
    }
}

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::ValidationError { message: s }
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::ValidationError {
            message: s.to_string(),
        }
    }
}
