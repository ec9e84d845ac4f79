//! # claw-cli
//!
//! Clawbernetes command-line interface.
//!
//! Provides commands for:
//! - Listing the containers an agent runs (`container list`)
//! - Listing the agents registered with a master (`agent list`)
//!
//! # Architecture
//!
//! Each command queries one component's JSON endpoint over HTTP and prints
//! the result as a whitespace-aligned table or as JSON. Output goes to any
//! [`std::io::Write`], so [`run_blocking`] can be driven in-process by tests
//! that capture what the command prints.
//!
//! ```text
//! ┌──────────────┐   GET /containers   ┌─────────┐
//! │ clawbernetes │────────────────────►│  agent  │
//! │              │   GET /agents       ├─────────┤
//! │              │────────────────────►│ master  │
//! └──────────────┘                     └─────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod output;
pub mod run;

pub use cli::{AgentCommands, Cli, Commands, ContainerCommands, ContainerListArgs, Format};
pub use client::{AgentClient, ContainerClient, HttpClient};
pub use error::CliError;
pub use output::{AgentList, ContainerList, OutputFormat, TableDisplay};
pub use run::{run, run_blocking};
