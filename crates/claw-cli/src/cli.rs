//! Command-line argument parsing with clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Clawbernetes CLI.
#[derive(Parser, Debug, Clone)]
#[command(name = "clawbernetes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Request timeout in seconds.
    #[arg(long, env = "CLAWBERNETES_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inspect containers on an agent.
    Container {
        /// Container subcommand to execute.
        #[command(subcommand)]
        command: ContainerCommands,
    },

    /// Inspect agents registered with a master.
    Agent {
        /// Agent subcommand to execute.
        #[command(subcommand)]
        command: AgentCommands,
    },
}

/// Container subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ContainerCommands {
    /// List the containers running on an agent.
    List(ContainerListArgs),
}

/// Arguments for `container list`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ContainerListArgs {
    /// Agent address (`host:port`).
    #[arg(long, env = "CLAWBERNETES_AGENT")]
    pub agent: String,

    /// Only list this container.
    #[arg(long)]
    pub container_id: Option<String>,
}

/// Agent subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AgentCommands {
    /// List the agents registered with a master.
    List {
        /// Master address (`host:port`).
        #[arg(long, env = "CLAWBERNETES_MASTER")]
        master: String,
    },
}
