//! Readiness markers printed on stdout.
//!
//! Each marker is one line. Supervisors read the child's stdout line by line
//! and parse with [`Marker::from_str`]; lines that are not markers are
//! ignored.
//!
//! ```text
//! LISTENING 127.0.0.1:43117
//! REGISTERED agent-9b0e…
//! TASK_RUNNING 1c4f… 77aa…
//! ```

use std::fmt;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::str::FromStr;

/// A readiness signal emitted by a minicluster binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// The HTTP listener is bound and accepting connections.
    Listening(SocketAddr),
    /// The agent was accepted by the master.
    Registered {
        /// Agent identifier.
        agent_id: String,
    },
    /// The agent reports the task's container.
    TaskRunning {
        /// Task identifier.
        task_id: String,
        /// Container the task runs in.
        container_id: String,
    },
}

impl Marker {
    /// Write the marker to stdout and flush.
    pub fn announce(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{self}")?;
        stdout.flush()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listening(addr) => write!(f, "LISTENING {addr}"),
            Self::Registered { agent_id } => write!(f, "REGISTERED {agent_id}"),
            Self::TaskRunning {
                task_id,
                container_id,
            } => write!(f, "TASK_RUNNING {task_id} {container_id}"),
        }
    }
}

/// Error returned for lines that are not markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAMarker;

impl FromStr for Marker {
    type Err = NotAMarker;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let marker = match (words.next(), words.next(), words.next()) {
            (Some("LISTENING"), Some(addr), None) => {
                Self::Listening(addr.parse().map_err(|_| NotAMarker)?)
            }
            (Some("REGISTERED"), Some(agent_id), None) => Self::Registered {
                agent_id: agent_id.to_string(),
            },
            (Some("TASK_RUNNING"), Some(task_id), Some(container_id)) => Self::TaskRunning {
                task_id: task_id.to_string(),
                container_id: container_id.to_string(),
            },
            _ => return Err(NotAMarker),
        };

        if words.next().is_some() {
            return Err(NotAMarker);
        }
        Ok(marker)
    }
}
