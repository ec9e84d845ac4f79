//! Error types for the minicluster servers and clients.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for minicluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors raised by the master, the agent, or the task launcher.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Failed to bind the listen address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    /// Resource not found.
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A resource with the same id already exists.
    #[error("{0} already exists: {1}")]
    Conflict(&'static str, String),

    /// Launching a task process failed.
    #[error("failed to launch task {task_id}: {source}")]
    Launch {
        /// Task that could not be launched.
        task_id: String,
        /// Underlying spawn error.
        source: std::io::Error,
    },

    /// Talking to a peer component failed.
    #[error("request to {url} failed: {message}")]
    Peer {
        /// URL that was requested.
        url: String,
        /// What went wrong.
        message: String,
    },

    /// Server failure.
    #[error("internal error: {0}")]
    Internal(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClusterError {
    pub(crate) fn peer(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Peer {
            url: url.into(),
            message: err.to_string(),
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for ClusterError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            Self::NotFound(_, _) => (StatusCode::NOT_FOUND, "not_found"),
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::Conflict(_, _) => (StatusCode::CONFLICT, "conflict"),
            Self::Peer { .. } => (StatusCode::BAD_GATEWAY, "peer_error"),
            Self::BindFailed(_, _) | Self::Launch { .. } | Self::Internal(_) | Self::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            error,
            message: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
