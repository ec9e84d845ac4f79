//! Single-host Clawbernetes cluster for end-to-end tests.
//!
//! Three binaries make up the cluster:
//!
//! - `claw-master` keeps the agent registry.
//! - `claw-agent` registers with a master and runs task processes.
//! - `claw-execute` launches one task on an agent and holds it until
//!   signalled.
//!
//! Each binary reports readiness through [`Marker`] lines on stdout and logs
//! through `tracing` on stderr.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod client;
pub mod config;
pub mod containerizer;
pub mod error;
pub mod marker;
pub mod master;
pub mod server;
pub mod types;

pub use agent::AgentState;
pub use client::{DEFAULT_REQUEST_TIMEOUT, PeerClient};
pub use containerizer::Containerizer;
pub use error::{ClusterError, ClusterResult};
pub use marker::{Marker, NotAMarker};
pub use master::MasterState;
pub use types::{AgentInfo, ContainerInfo, ContainerStatus, Health, LaunchTask, RegisterAgent};

use tracing_subscriber::EnvFilter;

/// Install the stderr `tracing` subscriber used by the binaries.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
