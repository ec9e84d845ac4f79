//! Text layout: cell rules, rendering and splitting.

use std::fmt::Write as _;

use crate::error::{TableError, TableResult};

/// Separator written between padded columns.
pub const COLUMN_SEPARATOR: &str = "  ";

/// Check that a value can be stored in a cell and read back unchanged.
///
/// # Errors
///
/// Returns [`TableError::InvalidCell`] if the value is empty, has leading or
/// trailing whitespace, contains a line break, or contains two consecutive
/// whitespace characters.
pub fn validate_cell(value: &str) -> TableResult<()> {
    let reject = |reason| {
        Err(TableError::InvalidCell {
            value: value.to_string(),
            reason,
        })
    };

    if value.is_empty() {
        return reject("cell is empty");
    }
    if value.contains(['\n', '\r']) {
        return reject("contains a line break");
    }
    if value.trim() != value {
        return reject("has leading or trailing whitespace");
    }

    let mut previous_blank = false;
    for ch in value.chars() {
        let blank = ch.is_whitespace();
        if blank && previous_blank {
            return reject("contains a run of whitespace");
        }
        previous_blank = blank;
    }
    Ok(())
}

/// Width of each column, measured in chars.
pub(crate) fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.first().map_or(0, Vec::len);
    let mut widths = vec![0; columns];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

/// Render one row against precomputed column widths.
pub(crate) fn render_row(row: &[String], widths: &[usize]) -> String {
    let last = row.len().saturating_sub(1);
    let mut line = String::new();
    for (i, (cell, &width)) in row.iter().zip(widths).enumerate() {
        if i == last {
            line.push_str(cell);
        } else {
            // Writing to a String cannot fail.
            let _ = write!(line, "{cell:<width$}{COLUMN_SEPARATOR}");
        }
    }
    line
}

/// Split a trimmed line at every run of two or more whitespace characters.
///
/// A lone whitespace character is part of the surrounding cell.
pub(crate) fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut gap = String::new();

    for ch in line.chars() {
        if ch.is_whitespace() {
            gap.push(ch);
            continue;
        }
        match gap.chars().count() {
            0 => {}
            1 => cell.push_str(&gap),
            _ => cells.push(std::mem::take(&mut cell)),
        }
        gap.clear();
        cell.push(ch);
    }

    if !cell.is_empty() {
        cells.push(cell);
    }
    cells
}
