//! Scoped ownership of a whole test cluster.

use tracing::info;

use crate::agent::Agent;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::master::Master;
use crate::task::{Task, TaskSpec};

/// A master with its agents and tasks.
///
/// Components are launched in dependency order and killed in reverse order
/// (tasks, agents, master) by [`shutdown`](Self::shutdown) or on drop, so a
/// failing test still releases every process.
#[derive(Debug)]
pub struct TestCluster {
    config: HarnessConfig,
    tasks: Vec<Task>,
    agents: Vec<Agent>,
    master: Master,
}

impl TestCluster {
    /// Launch a master.
    ///
    /// # Errors
    ///
    /// Returns an error if the master does not become ready.
    pub fn start(config: HarnessConfig) -> HarnessResult<Self> {
        let master = Master::launch(&config)?;
        Ok(Self {
            config,
            tasks: Vec::new(),
            agents: Vec::new(),
            master,
        })
    }

    /// Launch a master and one agent.
    ///
    /// # Errors
    ///
    /// Returns an error if either component does not become ready.
    pub fn with_agent(config: HarnessConfig) -> HarnessResult<Self> {
        let mut cluster = Self::start(config)?;
        cluster.launch_agent()?;
        Ok(cluster)
    }

    /// Configuration shared by all components.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The master.
    pub fn master(&self) -> &Master {
        &self.master
    }

    /// Agents in launch order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agent by launch index.
    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    /// Tasks in launch order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Launch another agent against the master.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent does not become ready.
    pub fn launch_agent(&mut self) -> HarnessResult<&Agent> {
        let agent = Agent::launch(&self.config, &self.master)?;
        let index = self.agents.len();
        self.agents.push(agent);
        Ok(&self.agents[index])
    }

    /// Launch a task on the agent at `agent_index`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::NoSuchAgent`] for an unknown agent index, or
    /// the task's launch error.
    pub fn launch_task(&mut self, agent_index: usize, spec: TaskSpec) -> HarnessResult<&Task> {
        let agent = self
            .agents
            .get(agent_index)
            .ok_or(HarnessError::NoSuchAgent {
                index: agent_index,
                launched: self.agents.len(),
            })?;
        let task = Task::launch(&self.config, agent, spec)?;
        let index = self.tasks.len();
        self.tasks.push(task);
        Ok(&self.tasks[index])
    }

    /// Kill everything in reverse dependency order. Idempotent.
    pub fn shutdown(&mut self) {
        for task in self.tasks.iter_mut().rev() {
            task.kill();
        }
        for agent in self.agents.iter_mut().rev() {
            agent.kill();
        }
        self.master.kill();
        info!(master = %self.master.id(), "cluster shut down");
    }

    /// The last `lines` log lines of every component, master first.
    pub fn logs_tail(&self, lines: usize) -> String {
        let mut out = self.master.logs_tail(lines);
        for agent in &self.agents {
            out.push_str(&agent.logs_tail(lines));
        }
        for task in &self.tasks {
            out.push_str(&task.logs_tail(lines));
        }
        out
    }
}

impl Drop for TestCluster {
    fn drop(&mut self) {
        self.shutdown();
    }
}
