//! Task processes on the agent.
//!
//! Every launched task gets a container id and a `sh -c` child process that
//! leads its own process group. Whatever the command forks stays in that
//! group, so destroying a container kills the whole group, not just the
//! shell. Containers whose shell has exited on its own are pruned, with
//! their group, the next time the container list is read. Dropping the
//! containerizer kills every group.

use std::collections::HashMap;
use std::process::Stdio;

use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use parking_lot::Mutex;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ClusterError, ClusterResult};
use crate::types::{ContainerInfo, ContainerStatus, LaunchTask};

struct Container {
    info: ContainerInfo,
    child: Child,
    // Taken once the group has been killed.
    group: Option<Pid>,
}

impl Container {
    fn kill_group(&mut self) {
        let Some(group) = self.group.take() else {
            return;
        };
        match killpg(group, Signal::SIGKILL) {
            Ok(()) => debug!(task_id = %self.info.executor_id, %group, "killed process group"),
            // Every member already exited.
            Err(Errno::ESRCH) => {}
            Err(e) => warn!(task_id = %self.info.executor_id, %group, error = %e, "failed to kill process group"),
        }
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        self.kill_group();
    }
}

/// Launches and tracks task processes, keyed by task id.
#[derive(Default)]
pub struct Containerizer {
    containers: Mutex<HashMap<String, Container>>,
}

impl std::fmt::Debug for Containerizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Containerizer")
            .field("containers", &self.containers.lock().len())
            .finish()
    }
}

impl Containerizer {
    /// Create an empty containerizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the task's command in a new container.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is incomplete, the task id is already
    /// running, or the process cannot be spawned.
    pub fn launch(&self, task: &LaunchTask) -> ClusterResult<ContainerInfo> {
        for (field, value) in [
            ("task_id", &task.task_id),
            ("framework_id", &task.framework_id),
            ("command", &task.command),
        ] {
            if value.trim().is_empty() {
                return Err(ClusterError::InvalidRequest(format!("{field} cannot be empty")));
            }
        }

        let mut containers = self.containers.lock();
        if containers.contains_key(&task.task_id) {
            return Err(ClusterError::Conflict("task", task.task_id.clone()));
        }

        // stdout belongs to the agent's readiness markers.
        let child = Command::new("sh")
            .arg("-c")
            .arg(&task.command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClusterError::Launch {
                task_id: task.task_id.clone(),
                source,
            })?;

        let info = ContainerInfo {
            container_id: Uuid::new_v4().to_string(),
            framework_id: task.framework_id.clone(),
            executor_id: task.task_id.clone(),
            executor_name: format!(
                "Command Executor (Task: {}) (Command: sh -c '{}')",
                task.task_id, task.command
            ),
            source: task.name.clone(),
            status: ContainerStatus {
                executor_pid: child.id(),
            },
        };

        info!(
            task_id = %task.task_id,
            container_id = %info.container_id,
            pid = ?info.status.executor_pid,
            "launched task"
        );

        let group = child
            .id()
            .and_then(|pid| i32::try_from(pid).ok())
            .map(Pid::from_raw);
        containers.insert(
            task.task_id.clone(),
            Container {
                info: info.clone(),
                child,
                group,
            },
        );
        Ok(info)
    }

    /// Live containers, optionally restricted to one container id.
    pub fn containers(&self, container_id: Option<&str>) -> Vec<ContainerInfo> {
        let mut containers = self.containers.lock();
        containers.retain(|task_id, container| match container.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                info!(task_id = %task_id, %status, "task exited");
                false
            }
            Err(e) => {
                warn!(task_id = %task_id, error = %e, "failed to poll task");
                true
            }
        });

        let mut list: Vec<ContainerInfo> = containers
            .values()
            .map(|c| c.info.clone())
            .filter(|info| container_id.is_none_or(|id| info.container_id == id))
            .collect();
        list.sort_by(|a, b| a.container_id.cmp(&b.container_id));
        list
    }

    /// Number of tracked containers, including ones not yet pruned.
    pub fn len(&self) -> usize {
        self.containers.lock().len()
    }

    /// Whether no containers are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kill the task's process and forget its container.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::NotFound`] if no container runs the task.
    pub async fn destroy(&self, task_id: &str) -> ClusterResult<ContainerInfo> {
        let container = self
            .containers
            .lock()
            .remove(task_id)
            .ok_or_else(|| ClusterError::NotFound("task", task_id.to_string()))?;

        Ok(reap(container).await)
    }

    /// Kill every task. Used on agent shutdown.
    pub async fn destroy_all(&self) {
        let drained: Vec<Container> = self.containers.lock().drain().map(|(_, c)| c).collect();
        for container in drained {
            reap(container).await;
        }
    }
}

async fn reap(mut container: Container) -> ContainerInfo {
    let task_id = container.info.executor_id.clone();
    let reaped = if container.group.is_some() {
        container.kill_group();
        container.child.wait().await.map(drop)
    } else {
        container.child.kill().await
    };
    match reaped {
        Ok(()) => debug!(task_id = %task_id, "reaped task"),
        Err(e) => warn!(task_id = %task_id, error = %e, "failed to reap task"),
    }
    let mut info = container.info.clone();
    info.status.executor_pid = None;
    info
}
