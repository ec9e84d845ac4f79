//! The master component.

use std::ops::{Deref, DerefMut};

use uuid::Uuid;

use crate::component::{ComponentKind, ProcessComponent};
use crate::config::HarnessConfig;
use crate::error::HarnessResult;

/// A `claw-master` process.
///
/// Dereferences to [`ProcessComponent`] for the lifecycle operations.
#[derive(Debug)]
pub struct Master {
    component: ProcessComponent,
}

impl Master {
    /// Describe a master listening on an ephemeral loopback port.
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        let id = format!("master-{}", Uuid::new_v4());
        let args = vec!["--id".to_string(), id.clone()];
        Self {
            component: ProcessComponent::new(
                ComponentKind::Master,
                id,
                &config.master_bin,
                args,
                config,
            ),
        }
    }

    /// Start a master and wait until it accepts connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started or never becomes
    /// ready.
    pub fn launch(config: &HarnessConfig) -> HarnessResult<Self> {
        let mut master = Self::new(config);
        master.component.launch()?;
        Ok(master)
    }
}

impl Deref for Master {
    type Target = ProcessComponent;

    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

impl DerefMut for Master {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.component
    }
}
