//! Normalized API error shape.

use serde_json::Value;
use thiserror::Error;

/// Fixed message for HTTP 401.
pub const UNAUTHORIZED_MESSAGE: &str =
    "Unauthorized: your session has expired or is invalid. Please log in again.";
/// Fixed message for HTTP 403.
pub const FORBIDDEN_MESSAGE: &str =
    "Forbidden: you do not have permission to perform this action.";
/// Fixed message for HTTP 404.
pub const NOT_FOUND_MESSAGE: &str = "Not found: the requested resource does not exist.";
/// Fixed message for HTTP 500.
pub const SERVER_ERROR_MESSAGE: &str =
    "Server error: something went wrong on the backend. Please try again later.";

/// Failure category. Flat and status-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response.
    Transport,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404.
    NotFound,
    /// HTTP 500.
    Server,
    /// Any other non-2xx status.
    Status,
    /// A 2xx response whose body does not match the expected schema.
    Decode,
    /// Rejected before sending (e.g., an absolute URL where a path was expected).
    InvalidRequest,
    /// The session could not be persisted or erased locally.
    Session,
    /// Local file I/O around uploads and downloads.
    Io,
}

/// Every failure surfaced by this crate: `{message, status, data}` plus a kind.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status, absent for failures that never got a response.
    pub status: Option<u16>,
    /// Decoded error body (JSON, or the raw text wrapped in a string).
    pub data: Option<Value>,
}

impl ApiError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            data: None,
        }
    }

    pub(crate) fn transport(error: &reqwest::Error) -> Self {
        Self::new(ErrorKind::Transport, error.to_string())
    }

    pub(crate) fn decode(status: Option<u16>, detail: impl std::fmt::Display) -> Self {
        Self {
            status,
            ..Self::new(
                ErrorKind::Decode,
                format!("unexpected response from backend: {detail}"),
            )
        }
    }

    pub(crate) fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, detail)
    }

    pub(crate) fn session(error: &exam_session::SessionError) -> Self {
        Self::new(ErrorKind::Session, error.to_string())
    }

    pub(crate) fn io(context: &str, error: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("{context}: {error}"))
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ErrorKind::Unauthorized)
    }
}
