//! Agent command implementation.

use std::io::Write;

use crate::cli::AgentCommands;
use crate::client::AgentClient;
use crate::error::CliError;
use crate::output::{AgentList, OutputFormat};

/// Agent command executor.
pub struct AgentCommand<C> {
    client: C,
}

impl<C: AgentClient> AgentCommand<C> {
    /// Create an agent command backed by `client`.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Execute an agent subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the master request or writing the output fails.
    pub async fn execute<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &AgentCommands,
    ) -> Result<(), CliError> {
        match command {
            AgentCommands::List { .. } => {
                let agents = self.client.list_agents().await?;
                format.write(writer, &AgentList { agents })?;
            }
        }
        Ok(())
    }
}

/// Fake agent registry for testing.
#[cfg(test)]
pub struct FakeAgentClient {
    agents: Result<Vec<claw_minicluster::AgentInfo>, String>,
}

#[cfg(test)]
impl FakeAgentClient {
    /// Registry holding `agents`.
    pub fn with_agents(agents: Vec<claw_minicluster::AgentInfo>) -> Self {
        Self { agents: Ok(agents) }
    }

    /// Registry that cannot be reached.
    pub fn unreachable(message: &str) -> Self {
        Self {
            agents: Err(message.to_string()),
        }
    }
}

#[cfg(test)]
impl AgentClient for FakeAgentClient {
    async fn list_agents(&self) -> Result<Vec<claw_minicluster::AgentInfo>, CliError> {
        self.agents.clone().map_err(CliError::Connection)
    }
}
