//! JSON bodies exchanged with the master and agent HTTP endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An agent as known to the master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    /// Agent identifier.
    pub agent_id: String,
    /// Address the agent serves HTTP on (`host:port`).
    pub addr: String,
    /// When the master accepted the registration.
    pub registered_at: DateTime<Utc>,
}

/// Body of `POST /agents` on the master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterAgent {
    /// Agent identifier.
    pub agent_id: String,
    /// Address the agent serves HTTP on.
    pub addr: String,
}

/// Body of `POST /tasks` on the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchTask {
    /// Task identifier, also used as the executor id.
    pub task_id: String,
    /// Human-readable task name.
    pub name: String,
    /// Framework the task belongs to.
    pub framework_id: String,
    /// Shell command run as the task body.
    pub command: String,
}

/// Runtime status of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    /// Pid of the process running the task, if it is still alive.
    pub executor_pid: Option<u32>,
}

/// A container as reported by `GET /containers` on the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Container identifier assigned by the agent.
    pub container_id: String,
    /// Framework that launched the task.
    pub framework_id: String,
    /// Executor running the task.
    pub executor_id: String,
    /// Descriptive executor name.
    pub executor_name: String,
    /// Task name the container was created for.
    pub source: String,
    /// Runtime status.
    pub status: ContainerStatus,
}

/// Body of `GET /health` on both servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// `"master"` or `"agent"`.
    pub role: String,
    /// Component identifier.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_info_uses_snake_case_keys() {
        let info = ContainerInfo {
            container_id: "c-1".into(),
            framework_id: "fw-1".into(),
            executor_id: "t-1".into(),
            executor_name: "Command Executor (Task: t-1) (Command: sh -c 'sleep 1')".into(),
            source: "t-1".into(),
            status: ContainerStatus {
                executor_pid: Some(42),
            },
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["container_id"], "c-1");
        assert_eq!(value["framework_id"], "fw-1");
        assert_eq!(value["executor_id"], "t-1");
        assert_eq!(value["status"]["executor_pid"], 42);
    }

    #[test]
    fn launch_task_roundtrips_through_json() {
        let task = LaunchTask {
            task_id: "t-1".into(),
            name: "sleeper".into(),
            framework_id: "fw-1".into(),
            command: "sleep 1000".into(),
        };
        let json = serde_json::to_string(&task).unwrap();
        let back: LaunchTask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
