//! Execution-protocol error types.

use thiserror::Error;

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors a transport collaborator reports.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend answered with an error status.
    #[error("backend error: {message} (status: {status})")]
    Remote {
        /// HTTP-like status code.
        status: u16,
        /// Human-readable error message.
        message: String,
    },

    /// The request never got a backend answer (network, DNS, TLS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// Failed to deserialize the backend answer.
    #[error("failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),

    /// Response channel was closed before an answer arrived.
    #[error("response channel closed unexpectedly")]
    ChannelClosed,
}

impl BackendError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::DeserializeFailed(err)
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for BackendError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::ChannelClosed
    }
}

/// Normalized classification of a failed execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    ProtectedReport,
    NotFound,
    DataTooLarge,
    NoData,
    /// Network failure or a status with no known meaning.
    Unknown,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            204 => ErrorKind::NoData,
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::ProtectedReport,
            404 => ErrorKind::NotFound,
            413 => ErrorKind::DataTooLarge,
            _ => ErrorKind::Unknown,
        }
    }

    /// Whether the backend itself classified the failure.
    pub fn is_known(&self) -> bool {
        !matches!(self, ErrorKind::Unknown)
    }
}

/// Error payload kept in execution state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind:?}: {message}")]
pub struct ExecutionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&BackendError> for ExecutionError {
    fn from(err: &BackendError) -> Self {
        let kind = match err {
            BackendError::Remote { status, .. } => ErrorKind::from_status(*status),
            _ => ErrorKind::Unknown,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<BackendError> for ExecutionError {
    fn from(err: BackendError) -> Self {
        Self::from(&err)
    }
}
