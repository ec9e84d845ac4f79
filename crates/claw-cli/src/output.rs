//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats. Tables are
//! rendered with `claw_table`, so anything the CLI prints in table format can
//! be parsed back with [`claw_table::Table::parse`].

use std::io::Write;

use claw_minicluster::{AgentInfo, ContainerInfo};
use claw_table::Table;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Header of the `container list` table.
pub const CONTAINER_HEADER: [&str; 3] = ["Container ID", "Framework ID", "Name"];

/// Header of the `agent list` table.
pub const AGENT_HEADER: [&str; 2] = ["Agent ID", "Address"];

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, table construction or writing
    /// fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write + ?Sized,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                let table = value.to_table()?;
                writeln!(writer, "{table}")?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Build the table: header row first, then one row per item.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented as a table cell.
    fn to_table(&self) -> Result<Table, CliError>;
}

/// Containers reported by an agent.
///
/// Serializes as the bare array the agent returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContainerList {
    /// Containers in the order the agent listed them.
    pub containers: Vec<ContainerInfo>,
}

impl TableDisplay for ContainerList {
    fn to_table(&self) -> Result<Table, CliError> {
        let mut table = Table::new(CONTAINER_HEADER)?;
        for c in &self.containers {
            table.add_row([&c.container_id, &c.framework_id, &c.executor_id])?;
        }
        Ok(table)
    }
}

/// Agents registered with a master.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AgentList {
    /// Agents in registration order.
    pub agents: Vec<AgentInfo>,
}

impl TableDisplay for AgentList {
    fn to_table(&self) -> Result<Table, CliError> {
        let mut table = Table::new(AGENT_HEADER)?;
        for a in &self.agents {
            table.add_row([&a.agent_id, &a.addr])?;
        }
        Ok(table)
    }
}
