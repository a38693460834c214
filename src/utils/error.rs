//! Error types and handling
//!
//! Common error types used across the crate. The failure taxonomy is
//! deliberately small: device/permission trouble at capture start, transport
//! failures where no response arrived, and structured rejections from the
//! recording store. None of them are fatal to the process; callers log and
//! keep their prior in-memory state.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network-level failure: the request never completed.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status and (usually) a JSON error body.
    #[error("server rejected request ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// start() was called while a capture session is already running.
    #[error("a recording session is already active")]
    SessionActive,

    /// An operation that needs an active session found none.
    #[error("no recording session is active")]
    SessionIdle,
}

impl AppError {
    /// Stable identifier for the error kind, used in log lines and by tests
    /// asserting on outcomes without matching display strings.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Remote { .. } => "REMOTE_ERROR",
            AppError::Capture(_) => "CAPTURE_ERROR",
            AppError::PermissionDenied(_) => "PERMISSION_DENIED",
            AppError::SessionActive => "SESSION_ACTIVE",
            AppError::SessionIdle => "SESSION_IDLE",
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            AppError::Capture("x".into()),
            AppError::PermissionDenied("x".into()),
            AppError::SessionActive,
            AppError::SessionIdle,
            AppError::Remote {
                status: 500,
                message: "boom".into(),
            },
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_remote_error_display() {
        let err = AppError::Remote {
            status: 413,
            message: "file too large".into(),
        };
        assert_eq!(
            err.to_string(),
            "server rejected request (413): file too large"
        );
    }
}
