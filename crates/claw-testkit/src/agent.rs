//! The agent component.

use std::net::SocketAddr;
use std::ops::{Deref, DerefMut};

use uuid::Uuid;

use crate::component::{ComponentKind, ProcessComponent};
use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::master::Master;

/// A `claw-agent` process registered with a [`Master`].
#[derive(Debug)]
pub struct Agent {
    component: ProcessComponent,
    master_addr: SocketAddr,
}

impl Agent {
    /// Describe an agent that registers with `master`.
    ///
    /// The master is checked here, not at spawn: the address is captured
    /// into the agent's arguments now. Prefer [`launch`](Self::launch),
    /// which checks and starts in one step.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DependencyNotReady`](crate::HarnessError::DependencyNotReady)
    /// unless `master` is `Ready`, and
    /// [`HarnessError::DependencyExited`](crate::HarnessError::DependencyExited)
    /// if its process has exited.
    pub fn new(config: &HarnessConfig, master: &Master) -> HarnessResult<Self> {
        let master_addr = master.dependency_addr(ComponentKind::Agent)?;
        let id = format!("agent-{}", Uuid::new_v4());
        let args = vec![
            "--master".to_string(),
            master_addr.to_string(),
            "--id".to_string(),
            id.clone(),
        ];
        Ok(Self {
            component: ProcessComponent::new(
                ComponentKind::Agent,
                id,
                &config.agent_bin,
                args,
                config,
            ),
            master_addr,
        })
    }

    /// Start an agent and wait until the master has accepted it.
    ///
    /// # Errors
    ///
    /// Returns an error if `master` is not ready, or the agent cannot be
    /// started or never registers.
    pub fn launch(config: &HarnessConfig, master: &Master) -> HarnessResult<Self> {
        let mut agent = Self::new(config, master)?;
        agent.component.launch()?;
        Ok(agent)
    }

    /// Address of the master this agent registers with.
    pub fn master_addr(&self) -> SocketAddr {
        self.master_addr
    }
}

impl Deref for Agent {
    type Target = ProcessComponent;

    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

impl DerefMut for Agent {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.component
    }
}
