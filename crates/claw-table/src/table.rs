//! The [`Table`] grid.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::codec::{column_widths, render_row, split_cells, validate_cell};
use crate::error::{TableError, TableResult};

/// A rectangular grid of cells. Row 0 is the header.
///
/// Every row has exactly as many cells as the header and every cell passes
/// [`validate_cell`], so `Table::parse(&t.render()) == Ok(t)` for any table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given header and no data rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is empty or a header cell is invalid.
    pub fn new<I, S>(header: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header = collect_cells(header)?;
        if header.is_empty() {
            return Err(TableError::RowWidth {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { rows: vec![header] })
    }

    /// Build a table from a full grid, header first.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, ragged, or holds an invalid cell.
    pub fn from_rows(rows: Vec<Vec<String>>) -> TableResult<Self> {
        let mut rows = rows.into_iter();
        let header = rows.next().ok_or(TableError::RowWidth {
            expected: 1,
            actual: 0,
        })?;
        let mut table = Self::new(header)?;
        for row in rows {
            table.add_row(row)?;
        }
        Ok(table)
    }

    /// Append a data row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row width differs from the header or a cell
    /// is invalid. The table is left unchanged on error.
    pub fn add_row<I, S>(&mut self, row: I) -> TableResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row = collect_cells(row)?;
        let expected = self.header().len();
        if row.len() != expected {
            return Err(TableError::RowWidth {
                expected,
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Parse rendered table text back into a table.
    ///
    /// Blank lines are skipped and each remaining line is trimmed before it
    /// is split into cells.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Malformed`] if there is no header line, a line
    /// has a different number of cells than the header, or a cell could not
    /// have been rendered (a stray carriage return, for instance).
    pub fn parse(text: &str) -> TableResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_number, header_line) = lines
            .next()
            .ok_or_else(|| TableError::malformed(1, "no header row"))?;
        let header = parse_line(header_number, header_line)?;
        let width = header.len();

        let mut rows = vec![header];
        for (number, line) in lines {
            let cells = parse_line(number, line)?;
            if cells.len() != width {
                return Err(TableError::malformed(
                    number,
                    format!("expected {width} cells, found {}", cells.len()),
                ));
            }
            rows.push(cells);
        }
        Ok(Self { rows })
    }

    /// Render the table as aligned text without a trailing newline.
    pub fn render(&self) -> String {
        let widths = column_widths(&self.rows);
        self.rows
            .iter()
            .map(|row| render_row(row, &widths))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `(rows, columns)`, counting the header as a row.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.header().len())
    }

    /// The header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Data rows, excluding the header.
    pub fn data_rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    /// All rows including the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.len() == 1
    }

    /// Cell at `(row, col)`, 0-indexed with the header at row 0.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Values of the named column across data rows.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let col = self.header().iter().position(|h| h == name)?;
        Some(self.data_rows().map(|row| row[col].as_str()).collect())
    }

    /// Consume the table, returning the grid.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

fn parse_line(number: usize, line: &str) -> TableResult<Vec<String>> {
    let cells = split_cells(line);
    for cell in &cells {
        if let Err(TableError::InvalidCell { value, reason }) = validate_cell(cell) {
            return Err(TableError::malformed(
                number,
                format!("cell {value:?} {reason}"),
            ));
        }
    }
    Ok(cells)
}

fn collect_cells<I, S>(cells: I) -> TableResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cells
        .into_iter()
        .map(|cell| {
            let cell = cell.into();
            validate_cell(&cell).map(|()| cell)
        })
        .collect()
}

impl Index<usize> for Table {
    type Output = [String];

    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row]
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Table {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
