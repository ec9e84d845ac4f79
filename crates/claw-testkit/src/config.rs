//! Harness configuration.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

/// Default time to wait for a component's readiness markers.
pub const DEFAULT_LAUNCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default time between SIGTERM and SIGKILL.
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(5);

/// Default interval for checking process state while waiting.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Binary names of the minicluster components.
pub const MASTER_BIN: &str = "claw-master";
/// See [`MASTER_BIN`].
pub const AGENT_BIN: &str = "claw-agent";
/// See [`MASTER_BIN`].
pub const EXECUTE_BIN: &str = "claw-execute";

/// Where the harness finds binaries and how long it waits for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Path of the master binary.
    pub master_bin: PathBuf,
    /// Path of the agent binary.
    pub agent_bin: PathBuf,
    /// Path of the task launcher binary.
    pub execute_bin: PathBuf,
    /// Upper bound on `await_ready`.
    pub launch_timeout: Duration,
    /// Upper bound between SIGTERM and SIGKILL in `kill`.
    pub kill_grace: Duration,
    /// How often process state is checked while waiting.
    pub poll_interval: Duration,
    /// Directory for component log files. A temporary directory per
    /// component is used when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            master_bin: locate_binary(MASTER_BIN),
            agent_bin: locate_binary(AGENT_BIN),
            execute_bin: locate_binary(EXECUTE_BIN),
            launch_timeout: DEFAULT_LAUNCH_TIMEOUT,
            kill_grace: DEFAULT_KILL_GRACE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_dir: None,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `CLAW_*` environment variables.
    ///
    /// | variable | field |
    /// |----------|-------|
    /// | `CLAW_MASTER_BIN` | `master_bin` |
    /// | `CLAW_AGENT_BIN` | `agent_bin` |
    /// | `CLAW_EXECUTE_BIN` | `execute_bin` |
    /// | `CLAW_LAUNCH_TIMEOUT_MS` | `launch_timeout` |
    /// | `CLAW_KILL_GRACE_MS` | `kill_grace` |
    /// | `CLAW_HARNESS_LOG_DIR` | `log_dir` |
    ///
    /// Unparseable durations are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| env::var(key).ok())
    }

    fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("CLAW_MASTER_BIN") {
            self.master_bin = path.into();
        }
        if let Some(path) = lookup("CLAW_AGENT_BIN") {
            self.agent_bin = path.into();
        }
        if let Some(path) = lookup("CLAW_EXECUTE_BIN") {
            self.execute_bin = path.into();
        }
        if let Some(ms) = lookup("CLAW_LAUNCH_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.launch_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = lookup("CLAW_KILL_GRACE_MS").and_then(|v| v.parse().ok()) {
            self.kill_grace = Duration::from_millis(ms);
        }
        if let Some(dir) = lookup("CLAW_HARNESS_LOG_DIR") {
            self.log_dir = Some(dir.into());
        }
        self
    }

    /// Set the master binary.
    #[must_use]
    pub fn with_master_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.master_bin = path.into();
        self
    }

    /// Set the agent binary.
    #[must_use]
    pub fn with_agent_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.agent_bin = path.into();
        self
    }

    /// Set the task launcher binary.
    #[must_use]
    pub fn with_execute_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.execute_bin = path.into();
        self
    }

    /// Set the readiness timeout.
    #[must_use]
    pub fn with_launch_timeout(mut self, timeout: Duration) -> Self {
        self.launch_timeout = timeout;
        self
    }

    /// Set the kill grace period.
    #[must_use]
    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }

    /// Set the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Keep component logs in `dir` instead of temporary directories.
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

/// Find `name` next to the running test binary.
///
/// Test executables live in `target/<profile>/deps`, binaries of the same
/// workspace in `target/<profile>`. Falls back to the bare name, resolved
/// through `PATH` at spawn time.
#[must_use]
pub fn locate_binary(name: &str) -> PathBuf {
    let file = format!("{name}{}", env::consts::EXE_SUFFIX);
    let found = env::current_exe().ok().and_then(|exe| {
        exe.ancestors()
            .skip(1)
            .take(3)
            .map(|dir| dir.join(&file))
            .find(|candidate| is_file(candidate))
    });

    match found {
        Some(path) => {
            debug!(binary = name, path = %path.display(), "located binary");
            path
        }
        None => PathBuf::from(file),
    }
}

fn is_file(path: &Path) -> bool {
    path.metadata().is_ok_and(|m| m.is_file())
}
