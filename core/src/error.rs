//! Error types for the task API client.
//!
//! # Design
//! `DomainError` is a closed set of failure kinds. Transport and HTTP failures
//! are classified into it at the client boundary, and `ui_message` maps each
//! kind onto a fixed user-facing string. HTTP-derived variants keep the status
//! code and the parsed error body so validation details survive.

use serde_json::{Map, Value};

/// Parsed JSON error body, e.g. `{"message": "...", "fields": {...}}`.
/// Empty when the server sent no body or a non-object body.
pub type ErrorPayload = Map<String, Value>;

/// Tag of a `DomainError`, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    NotFound,
    Unauthorized,
    Validation,
    Generic,
}

/// Classified failure of a client operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Connection refused, DNS failure or another socket-level error.
    #[error("Network error. Please check your internet connection.")]
    Network,

    /// The request exceeded its timeout.
    #[error("Request timed out. Check your network and try again.")]
    Timeout,

    /// The server returned 404.
    #[error("Item not found.")]
    NotFound { status: u16, details: ErrorPayload },

    /// The server returned 401 or 403.
    #[error("You are not authorized to perform this action.")]
    Unauthorized { status: u16, details: ErrorPayload },

    /// The server returned 400.
    #[error("Invalid request data.")]
    Validation { status: u16, details: ErrorPayload },

    /// Any other failure, with or without an HTTP status.
    #[error("{message}")]
    Generic {
        status: Option<u16>,
        message: String,
        details: ErrorPayload,
    },
}

impl DomainError {
    /// A `Generic` error that never reached an HTTP status.
    pub fn generic(message: impl Into<String>) -> Self {
        DomainError::Generic {
            status: None,
            message: message.into(),
            details: ErrorPayload::new(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Network => ErrorKind::Network,
            DomainError::Timeout => ErrorKind::Timeout,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Unauthorized { .. } => ErrorKind::Unauthorized,
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// HTTP status code, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            DomainError::Network | DomainError::Timeout => None,
            DomainError::NotFound { status, .. }
            | DomainError::Unauthorized { status, .. }
            | DomainError::Validation { status, .. } => Some(*status),
            DomainError::Generic { status, .. } => *status,
        }
    }

    pub fn details(&self) -> Option<&ErrorPayload> {
        match self {
            DomainError::Network | DomainError::Timeout => None,
            DomainError::NotFound { details, .. }
            | DomainError::Unauthorized { details, .. }
            | DomainError::Validation { details, .. }
            | DomainError::Generic { details, .. } => Some(details),
        }
    }

    /// Per-field validation messages, when the body carried a `fields` object.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.details()?.get("fields")?.as_object()
    }
}

/// Failure to complete an HTTP round-trip at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection refused or reset, DNS failure, unreachable host.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for DomainError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Connect(_) => DomainError::Network,
            TransportError::Timeout(_) => DomainError::Timeout,
            TransportError::Other(detail) => DomainError::generic(format!("Unexpected error: {detail}")),
        }
    }
}
