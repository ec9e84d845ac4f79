//! Error types for the harness and the HTTP probe.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::component::{ComponentKind, ComponentState};

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Result type alias for probe requests.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors raised while launching or addressing cluster components.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The component's binary could not be started.
    #[error("failed to spawn {kind} {id} from {}: {source}", .program.display())]
    Launch {
        /// Component kind.
        kind: ComponentKind,
        /// Component identifier.
        id: String,
        /// Binary that was executed.
        program: PathBuf,
        /// Underlying spawn error.
        source: std::io::Error,
    },

    /// The process exited before reporting readiness.
    #[error("{kind} {id} exited before becoming ready ({status})")]
    ExitedEarly {
        /// Component kind.
        kind: ComponentKind,
        /// Component identifier.
        id: String,
        /// Exit status as reported by the OS.
        status: String,
    },

    /// Readiness was not observed in time. The process has been killed.
    #[error("{kind} {id} not ready after {timeout:?}")]
    LaunchTimeout {
        /// Component kind.
        kind: ComponentKind,
        /// Component identifier.
        id: String,
        /// How long the harness waited.
        timeout: Duration,
    },

    /// A dependency has not reached `Ready`.
    #[error("cannot launch {kind}: {dependency} is {state}, not ready")]
    DependencyNotReady {
        /// Component that was being launched.
        kind: ComponentKind,
        /// The dependency it needs.
        dependency: ComponentKind,
        /// The dependency's current state.
        state: ComponentState,
    },

    /// A dependency reached ready but its process has since exited.
    #[error("cannot launch {kind}: {dependency} {id} has exited")]
    DependencyExited {
        /// Component that was being launched.
        kind: ComponentKind,
        /// The dependency it needs.
        dependency: ComponentKind,
        /// Id of the exited dependency.
        id: String,
    },

    /// An operation was called in the wrong lifecycle state.
    #[error("{kind} {id} is {actual}, expected {expected}")]
    InvalidState {
        /// Component kind.
        kind: ComponentKind,
        /// Component identifier.
        id: String,
        /// State the operation requires.
        expected: ComponentState,
        /// State the component is in.
        actual: ComponentState,
    },

    /// No agent was launched at the requested index.
    #[error("no agent at index {index} ({launched} launched)")]
    NoSuchAgent {
        /// Requested index.
        index: usize,
        /// Number of agents launched.
        launched: usize,
    },

    /// A task spec is missing a required key.
    #[error("invalid task spec: {0}")]
    InvalidTaskSpec(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`HttpProbe`](crate::HttpProbe).
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the body could not be read.
    #[error("GET {url} failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}: {body}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The body was not valid JSON or did not match the expected type.
    #[error("GET {url} returned invalid JSON: {source}")]
    Json {
        /// Requested URL.
        url: String,
        /// Decoder error.
        source: serde_json::Error,
    },
}

impl ProbeError {
    /// HTTP status code if the server answered with an error status.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
