//! Command-line configuration for the minicluster binaries.
//!
//! Every flag also reads an environment variable so supervisors can configure
//! children without building argument lists.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use uuid::Uuid;

const DEFAULT_LISTEN: &str = "127.0.0.1:0";

/// `claw-master` arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "claw-master", version, about = "Minicluster master")]
pub struct MasterArgs {
    /// Address to listen on. Port 0 picks a free port.
    #[arg(long, env = "CLAW_MASTER_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Master identifier. Generated when omitted.
    #[arg(long, env = "CLAW_MASTER_ID")]
    pub id: Option<String>,
}

impl MasterArgs {
    /// The configured id, or a fresh `master-<uuid>`.
    pub fn master_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("master-{}", Uuid::new_v4()))
    }
}

/// `claw-agent` arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "claw-agent", version, about = "Minicluster agent")]
pub struct AgentArgs {
    /// Address to listen on. Port 0 picks a free port.
    #[arg(long, env = "CLAW_AGENT_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Master address (`host:port`).
    #[arg(long, env = "CLAW_AGENT_MASTER")]
    pub master: String,

    /// Agent identifier. Generated when omitted.
    #[arg(long, env = "CLAW_AGENT_ID")]
    pub id: Option<String>,

    /// Registration attempts before giving up.
    #[arg(long, env = "CLAW_AGENT_REGISTER_ATTEMPTS", default_value_t = 20)]
    pub register_attempts: u32,

    /// Delay between registration attempts, in milliseconds.
    #[arg(long, env = "CLAW_AGENT_REGISTER_INTERVAL_MS", default_value_t = 100)]
    pub register_interval_ms: u64,
}

impl AgentArgs {
    /// The configured id, or a fresh `agent-<uuid>`.
    pub fn agent_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("agent-{}", Uuid::new_v4()))
    }

    /// Delay between registration attempts.
    pub fn register_interval(&self) -> Duration {
        Duration::from_millis(self.register_interval_ms)
    }
}

/// `claw-execute` arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "claw-execute",
    version,
    about = "Launch one task on an agent and keep it running until signalled"
)]
pub struct ExecuteArgs {
    /// Agent address (`host:port`).
    #[arg(long, env = "CLAW_EXECUTE_AGENT")]
    pub agent: String,

    /// Shell command the task runs.
    #[arg(long)]
    pub command: String,

    /// Task name.
    #[arg(long, default_value = "task")]
    pub name: String,

    /// Task identifier. Generated when omitted.
    #[arg(long)]
    pub task_id: Option<String>,

    /// Framework the task belongs to. Generated when omitted.
    #[arg(long, env = "CLAW_EXECUTE_FRAMEWORK_ID")]
    pub framework_id: Option<String>,
}

impl ExecuteArgs {
    /// The configured task id, or a fresh `task-<uuid>`.
    pub fn task_id(&self) -> String {
        self.task_id
            .clone()
            .unwrap_or_else(|| format!("task-{}", Uuid::new_v4()))
    }

    /// The configured framework id, or a fresh `framework-<uuid>`.
    pub fn framework_id(&self) -> String {
        self.framework_id
            .clone()
            .unwrap_or_else(|| format!("framework-{}", Uuid::new_v4()))
    }
}
