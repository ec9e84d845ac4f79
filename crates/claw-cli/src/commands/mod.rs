//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`container`] - Containers running on an agent
//! - [`agent`] - Agents registered with a master

pub mod agent;
pub mod container;

pub use agent::AgentCommand;
pub use container::ContainerCommand;
