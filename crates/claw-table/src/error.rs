//! Table codec errors.

use thiserror::Error;

/// Result type alias for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors produced while building or parsing a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Text does not follow the fixed-width table layout.
    #[error("malformed table at line {line}: {reason}")]
    Malformed {
        /// 1-based line number within the non-blank lines of the input.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A cell value cannot be represented without ambiguity.
    #[error("invalid cell {value:?}: {reason}")]
    InvalidCell {
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A row does not have as many cells as the header.
    #[error("row has {actual} cells, header has {expected}")]
    RowWidth {
        /// Header width.
        expected: usize,
        /// Width of the rejected row.
        actual: usize,
    },
}

impl TableError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
