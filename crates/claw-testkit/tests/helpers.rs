//! Fake component binaries for lifecycle tests.
//!
//! The scripts print the same readiness markers as the minicluster
//! binaries, so the harness can be exercised without building them.

#![allow(dead_code)]

use std::fs;
use std::net::TcpListener;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use claw_testkit::HarnessConfig;

/// Scripts and the listener the fake master and agent advertise.
pub struct Fakes {
    dir: PathBuf,
    /// Accepts connections for the whole test run.
    pub listener: TcpListener,
}

/// Written once, before any test forks a child.
pub static FAKES: LazyLock<Fakes> = LazyLock::new(Fakes::write);

impl Fakes {
    fn write() -> Self {
        let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("claw-testkit-fakes");
        fs::create_dir_all(&dir).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let closed = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let scripts = [
            (
                "master-ok",
                format!("echo \"args: $*\" >&2\necho LISTENING {addr}\nexec sleep 30"),
            ),
            ("master-silent", "exec sleep 30".to_string()),
            (
                "master-closed-port",
                format!("echo LISTENING {closed}\nexec sleep 30"),
            ),
            ("master-crash", "echo starting\nexit 3".to_string()),
            (
                "master-exits",
                format!("echo LISTENING {addr}\nsleep 0.5\nexit 0"),
            ),
            (
                "agent-ok",
                format!(
                    "echo \"args: $*\" >&2\necho LISTENING {addr}\necho REGISTERED agent-fake\nexec sleep 30"
                ),
            ),
            (
                "agent-unregistered",
                format!("echo LISTENING {addr}\nexec sleep 30"),
            ),
            (
                "execute-ok",
                "echo \"args: $*\" >&2\necho TASK_RUNNING fake-task fake-container\nexec sleep 30"
                    .to_string(),
            ),
            (
                "execute-stubborn",
                "trap '' TERM\necho TASK_RUNNING t c\nwhile :; do sleep 0.05; done".to_string(),
            ),
        ];

        for (name, body) in scripts {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        Self { dir, listener }
    }

    /// Path of the named script.
    pub fn bin(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Config pointing at the well-behaved fakes, with short timeouts.
pub fn fake_config() -> HarnessConfig {
    let fakes = &*FAKES;
    HarnessConfig::default()
        .with_master_bin(fakes.bin("master-ok"))
        .with_agent_bin(fakes.bin("agent-ok"))
        .with_execute_bin(fakes.bin("execute-ok"))
        .with_launch_timeout(Duration::from_secs(5))
        .with_kill_grace(Duration::from_secs(2))
        .with_poll_interval(Duration::from_millis(10))
}

/// Whether a process with `pid` still exists.
pub fn process_exists(pid: u32) -> bool {
    let pid = nix::unistd::Pid::from_raw(i32::try_from(pid).unwrap());
    nix::sys::signal::kill(pid, None).is_ok()
}
