//! The task component and its launch spec.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use claw_minicluster::Marker;
use uuid::Uuid;

use crate::agent::Agent;
use crate::component::{ComponentKind, ProcessComponent};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};

/// Key holding the shell command. Required.
pub const COMMAND: &str = "command";
/// Key holding the task name. Defaults to the task id.
pub const NAME: &str = "name";
/// Key holding the framework id. Generated by the launcher when absent.
pub const FRAMEWORK_ID: &str = "framework_id";

const KNOWN_KEYS: [&str; 3] = [COMMAND, NAME, FRAMEWORK_ID];

/// String map describing how to launch a task.
///
/// ```
/// use claw_testkit::TaskSpec;
///
/// let spec: TaskSpec = [("command", "sleep 1000")].into_iter().collect();
/// assert_eq!(spec.get("command"), Some("sleep 1000"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSpec {
    entries: BTreeMap<String, String>,
}

impl TaskSpec {
    /// A spec that runs `command`.
    #[must_use]
    pub fn command(command: impl Into<String>) -> Self {
        Self::default().with(COMMAND, command)
    }

    /// Set `key` to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn validate(&self) -> HarnessResult<&str> {
        if let Some(key) = self.entries.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            return Err(HarnessError::InvalidTaskSpec(format!("unknown key `{key}`")));
        }
        match self.get(COMMAND) {
            Some(command) if !command.trim().is_empty() => Ok(command),
            Some(_) => Err(HarnessError::InvalidTaskSpec("`command` is empty".into())),
            None => Err(HarnessError::InvalidTaskSpec("missing `command`".into())),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TaskSpec {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A task submitted to an [`Agent`] through `claw-execute`.
///
/// The component id doubles as the task id. Killing the component makes the
/// launcher delete the task on the agent.
#[derive(Debug)]
pub struct Task {
    component: ProcessComponent,
    spec: TaskSpec,
}

impl Task {
    /// Describe a task to run on `agent`.
    ///
    /// The agent is checked here, not at spawn. Use [`launch`](Self::launch)
    /// to check and start together.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DependencyNotReady`] unless `agent` is
    /// `Ready`, [`HarnessError::DependencyExited`] if its process has exited,
    /// and [`HarnessError::InvalidTaskSpec`] for a bad spec.
    pub fn new(config: &HarnessConfig, agent: &Agent, spec: TaskSpec) -> HarnessResult<Self> {
        let agent_addr = agent.dependency_addr(ComponentKind::Task)?;
        let command = spec.validate()?;

        let id = format!("task-{}", Uuid::new_v4());
        let mut args = vec![
            "--agent".to_string(),
            agent_addr.to_string(),
            "--command".to_string(),
            command.to_string(),
            "--name".to_string(),
            spec.get(NAME).unwrap_or(id.as_str()).to_string(),
            "--task-id".to_string(),
            id.clone(),
        ];
        if let Some(framework_id) = spec.get(FRAMEWORK_ID) {
            args.extend(["--framework-id".to_string(), framework_id.to_string()]);
        }

        Ok(Self {
            component: ProcessComponent::new(
                ComponentKind::Task,
                id,
                &config.execute_bin,
                args,
                config,
            ),
            spec,
        })
    }

    /// Start the task and wait until the agent reports its container.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent is not ready, the spec is invalid, or
    /// the task never starts.
    pub fn launch(config: &HarnessConfig, agent: &Agent, spec: TaskSpec) -> HarnessResult<Self> {
        let mut task = Self::new(config, agent, spec)?;
        task.component.launch()?;
        Ok(task)
    }

    /// The spec the task was launched with.
    pub fn spec(&self) -> &TaskSpec {
        &self.spec
    }

    /// Task id on the agent.
    pub fn task_id(&self) -> &str {
        self.component.id()
    }

    /// Container the agent started, once the task is running.
    pub fn container_id(&self) -> Option<&str> {
        self.component.markers().iter().find_map(|m| match m {
            Marker::TaskRunning { container_id, .. } => Some(container_id.as_str()),
            _ => None,
        })
    }
}

impl Deref for Task {
    type Target = ProcessComponent;

    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

impl DerefMut for Task {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn command_constructor() {
        let spec = TaskSpec::command("sleep 1000").with(NAME, "sleeper");
        assert_eq!(spec.validate().unwrap(), "sleep 1000");
        assert_eq!(
            spec.iter().collect::<Vec<_>>(),
            vec![("command", "sleep 1000"), ("name", "sleeper")]
        );
    }

    #[test_case(&[], "missing `command`"; "missing command")]
    #[test_case(&[("command", "   ")], "`command` is empty"; "blank command")]
    #[test_case(&[("command", "true"), ("image", "x")], "unknown key `image`"; "unknown key")]
    fn invalid_specs(entries: &[(&str, &str)], message: &str) {
        let spec: TaskSpec = entries.iter().copied().collect();
        let err = spec.validate().unwrap_err();
        assert_eq!(err.to_string(), format!("invalid task spec: {message}"));
    }
}
