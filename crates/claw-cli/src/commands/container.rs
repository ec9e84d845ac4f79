//! Container command implementation.

use std::io::Write;

use tracing::debug;

use crate::cli::ContainerCommands;
use crate::client::ContainerClient;
use crate::error::CliError;
use crate::output::{ContainerList, OutputFormat};

/// Container command executor.
pub struct ContainerCommand<C> {
    client: C,
}

impl<C: ContainerClient> ContainerCommand<C> {
    /// Create a container command backed by `client`.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Execute a container subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent request or writing the output fails.
    pub async fn execute<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &ContainerCommands,
    ) -> Result<(), CliError> {
        match command {
            ContainerCommands::List(args) => {
                let list = self.list(args.container_id.as_deref()).await?;
                format.write(writer, &list)?;
            }
        }
        Ok(())
    }

    /// Containers on the agent, optionally only `container_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, container_id: Option<&str>) -> Result<ContainerList, CliError> {
        let containers = self.client.list_containers(container_id).await?;
        debug!(count = containers.len(), "listed containers");
        Ok(ContainerList { containers })
    }
}

/// Fake container client for testing.
#[cfg(test)]
pub struct FakeContainerClient {
    containers: Vec<claw_minicluster::ContainerInfo>,
}

#[cfg(test)]
impl FakeContainerClient {
    /// Create a fake agent with no containers.
    pub fn new() -> Self {
        Self { containers: vec![] }
    }

    /// Add a container.
    #[must_use]
    pub fn with_container(mut self, info: claw_minicluster::ContainerInfo) -> Self {
        self.containers.push(info);
        self
    }
}

#[cfg(test)]
impl ContainerClient for FakeContainerClient {
    async fn list_containers(
        &self,
        container_id: Option<&str>,
    ) -> Result<Vec<claw_minicluster::ContainerInfo>, CliError> {
        Ok(self
            .containers
            .iter()
            .filter(|c| container_id.is_none_or(|id| c.container_id == id))
            .cloned()
            .collect())
    }
}
