//! # claw-table
//!
//! Fixed-width text tables for CLI output.
//!
//! A [`Table`] is a rectangular grid of string cells whose first row is the
//! header. [`Table::render`] lays it out as aligned columns and
//! [`Table::parse`] recovers the exact cells from that text, so command
//! output can be checked programmatically.
//!
//! ```text
//! Container ID  Framework ID  Name
//! 5c1e…         a77f…         task-1
//! ```
//!
//! # Format
//!
//! - Rows are separated by a single `\n`, the header is row 0.
//! - Every column but the last is padded to its widest cell and followed by
//!   [`COLUMN_SEPARATOR`] (two spaces). Lines never carry trailing spaces.
//! - Cells are non-empty, have no leading or trailing whitespace, no line
//!   breaks and no run of two or more whitespace characters. A single
//!   interior space is allowed (`Container ID`).
//!
//! Whitespace is never escaped. Values that break the cell rules are
//! rejected when the table is built rather than silently mangled.
//!
//! # Example
//!
//! ```rust
//! use claw_table::Table;
//!
//! let mut table = Table::new(["Container ID", "Name"]).unwrap();
//! table.add_row(["c-1", "sleeper"]).unwrap();
//!
//! let text = table.render();
//! assert_eq!(text, "Container ID  Name\nc-1           sleeper");
//!
//! let parsed = Table::parse(&text).unwrap();
//! assert_eq!(parsed, table);
//! assert_eq!(parsed.dimensions(), (2, 2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod error;
mod table;

pub use codec::{COLUMN_SEPARATOR, validate_cell};
pub use error::{TableError, TableResult};
pub use table::Table;
