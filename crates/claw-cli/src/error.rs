//! CLI error types.

use claw_table::TableError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The component could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The component answered with an error status.
    #[error("request to {url} failed with HTTP {status}: {body}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// A value cannot be shown in a table.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
