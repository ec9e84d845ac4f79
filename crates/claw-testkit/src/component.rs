//! Lifecycle of one supervised process.
//!
//! ```text
//! Unlaunched --spawn--> Starting --await_ready--> Ready
//!      \                   |                        |
//!       +------------------+-------kill-------------+--> Stopped
//! ```
//!
//! `Stopped` is terminal. A failed `spawn` or `await_ready` also ends in
//! `Stopped`, with the process reaped.
//!
//! The state only changes through this handle. A process that dies on its
//! own leaves the state where it was; [`ProcessComponent::is_alive`] tells
//! the two apart.
//!
//! Each process leads its own process group. `kill` signals the group, so
//! whatever the component forked goes down with it, and afterwards sweeps
//! descendants that had moved to groups of their own.
//!
//! The child's stdout is read on a background thread. Each line is appended
//! to the component's stdout log and, if it parses as a [`Marker`], forwarded
//! to `await_ready`. Stderr is copied to a second log file.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use claw_minicluster::Marker;
use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::sys::wait::{Id, WaitPidFlag, WaitStatus, waitid};
use nix::unistd::Pid;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::process_tree::Descendants;

/// Which cluster role a process plays. Decides its readiness markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Ready after `LISTENING` and a successful TCP connect.
    Master,
    /// Ready after `LISTENING` then `REGISTERED`.
    Agent,
    /// Ready after `TASK_RUNNING`.
    Task,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Master => "master",
            Self::Agent => "agent",
            Self::Task => "task",
        })
    }
}

/// Lifecycle state of a [`ProcessComponent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentState {
    /// Created, no process yet.
    Unlaunched,
    /// Process running, readiness not yet observed.
    Starting,
    /// Readiness observed.
    Ready,
    /// Process gone. Terminal.
    Stopped,
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unlaunched => "unlaunched",
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Stopped => "stopped",
        })
    }
}

struct LogFiles {
    stdout: PathBuf,
    stderr: PathBuf,
    // Removed with the component when no log directory is configured.
    _dir: Option<TempDir>,
}

impl LogFiles {
    fn create(base: Option<&Path>, id: &str) -> HarnessResult<Self> {
        let (dir, path) = match base {
            Some(base) => {
                fs::create_dir_all(base)?;
                (None, base.to_path_buf())
            }
            None => {
                let dir = tempfile::Builder::new()
                    .prefix(&format!("{id}-"))
                    .tempdir()?;
                let path = dir.path().to_path_buf();
                (Some(dir), path)
            }
        };
        Ok(Self {
            stdout: path.join(format!("{id}.stdout.log")),
            stderr: path.join(format!("{id}.stderr.log")),
            _dir: dir,
        })
    }
}

/// One supervised OS process.
///
/// Owns its child exclusively. Dropping the component kills the process.
pub struct ProcessComponent {
    kind: ComponentKind,
    id: String,
    program: PathBuf,
    args: Vec<String>,
    config: HarnessConfig,
    state: ComponentState,
    child: Option<Child>,
    markers: Option<Receiver<Marker>>,
    seen: Vec<Marker>,
    addr: Option<SocketAddr>,
    logs: Option<LogFiles>,
}

impl fmt::Debug for ProcessComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessComponent")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("state", &self.state)
            .field("pid", &self.pid())
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl ProcessComponent {
    /// Describe a process without starting it.
    ///
    /// [`Master`](crate::Master), [`Agent`](crate::Agent) and
    /// [`Task`](crate::Task) build the arguments for the minicluster
    /// binaries. Use this directly to supervise any program that prints the
    /// markers `kind` waits for.
    pub fn new(
        kind: ComponentKind,
        id: impl Into<String>,
        program: impl Into<PathBuf>,
        args: Vec<String>,
        config: &HarnessConfig,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            program: program.into(),
            args,
            config: config.clone(),
            state: ComponentState::Unlaunched,
            child: None,
            markers: None,
            seen: Vec::new(),
            addr: None,
            logs: None,
        }
    }

    /// Component kind.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Unique component identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current lifecycle state, as last changed through this handle.
    pub fn state(&self) -> ComponentState {
        self.state
    }

    /// Whether the owned process is still running.
    ///
    /// False before spawn and after kill, and also when the process exited
    /// on its own while `Starting` or `Ready`. Does not reap the process.
    pub fn is_alive(&self) -> bool {
        let Some(raw) = self.pid().and_then(|pid| i32::try_from(pid).ok()) else {
            return false;
        };
        let flags = WaitPidFlag::WEXITED | WaitPidFlag::WNOHANG | WaitPidFlag::WNOWAIT;
        match waitid(Id::Pid(Pid::from_raw(raw)), flags) {
            Ok(WaitStatus::StillAlive) => true,
            Ok(status) => {
                debug!(kind = %self.kind, id = %self.id, ?status, "process has exited");
                false
            }
            // Already reaped.
            Err(Errno::ECHILD) => false,
            Err(e) => {
                warn!(kind = %self.kind, id = %self.id, error = %e, "failed to poll process");
                true
            }
        }
    }

    /// Advertised `host:port`. Defined only while `Ready`.
    pub fn addr(&self) -> Option<SocketAddr> {
        self.addr.filter(|_| self.state == ComponentState::Ready)
    }

    /// OS process id while a process is owned.
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Markers observed so far, in order.
    pub fn markers(&self) -> &[Marker] {
        &self.seen
    }

    /// Paths of the stdout and stderr logs, once spawned.
    pub fn log_paths(&self) -> Option<(&Path, &Path)> {
        self.logs
            .as_ref()
            .map(|l| (l.stdout.as_path(), l.stderr.as_path()))
    }

    /// The last `lines` lines of each log, for failure messages.
    pub fn logs_tail(&self, lines: usize) -> String {
        let Some(logs) = &self.logs else {
            return String::new();
        };

        let mut out = String::new();
        for (stream, path) in [("stdout", &logs.stdout), ("stderr", &logs.stderr)] {
            let content = fs::read_to_string(path).unwrap_or_default();
            let all: Vec<&str> = content.lines().collect();
            out.push_str(&format!("--- {} {} {stream} ---\n", self.kind, self.id));
            for line in &all[all.len().saturating_sub(lines)..] {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Spawn, then wait for readiness.
    ///
    /// # Errors
    ///
    /// See [`spawn`](Self::spawn) and [`await_ready`](Self::await_ready).
    pub fn launch(&mut self) -> HarnessResult<()> {
        self.spawn()?;
        self.await_ready()
    }

    /// Start the process. `Unlaunched -> Starting`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidState`] unless `Unlaunched`, and
    /// [`HarnessError::Launch`] if the binary cannot be executed. A failed
    /// spawn leaves the component `Stopped`.
    pub fn spawn(&mut self) -> HarnessResult<()> {
        self.expect_state(ComponentState::Unlaunched)?;

        let result = self.start_process();
        if result.is_err() {
            self.state = ComponentState::Stopped;
        }
        result
    }

    fn start_process(&mut self) -> HarnessResult<()> {
        let logs = LogFiles::create(self.config.log_dir.as_deref(), &self.id)?;
        let stdout_log = File::create(&logs.stdout)?;
        let stderr_log = File::create(&logs.stderr)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .spawn()
            .map_err(|source| HarnessError::Launch {
                kind: self.kind,
                id: self.id.clone(),
                program: self.program.clone(),
                source,
            })?;

        let rx = match spawn_readers(&mut child, &self.id, stdout_log, stderr_log) {
            Ok(rx) => rx,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
        };

        info!(
            kind = %self.kind,
            id = %self.id,
            pid = child.id(),
            program = %self.program.display(),
            "spawned component"
        );

        self.child = Some(child);
        self.markers = Some(rx);
        self.logs = Some(logs);
        self.state = ComponentState::Starting;
        Ok(())
    }

    /// Block until the readiness markers arrive. `Starting -> Ready`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidState`] unless `Starting`,
    /// [`HarnessError::ExitedEarly`] if the process exits first, and
    /// [`HarnessError::LaunchTimeout`] if the launch timeout elapses. On
    /// either failure the process is reaped and the component is `Stopped`.
    pub fn await_ready(&mut self) -> HarnessResult<()> {
        self.expect_state(ComponentState::Starting)?;

        let timeout = self.config.launch_timeout;
        let poll = self.config.poll_interval;
        let deadline = Instant::now() + timeout;

        loop {
            if self.readiness_observed() && self.accepting(poll) {
                self.state = ComponentState::Ready;
                info!(kind = %self.kind, id = %self.id, addr = ?self.addr, "component ready");
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(kind = %self.kind, id = %self.id, ?timeout, logs = %self.logs_tail(20), "launch timed out");
                self.kill();
                return Err(HarnessError::LaunchTimeout {
                    kind: self.kind,
                    id: self.id.clone(),
                    timeout,
                });
            }

            let wait = (deadline - now).min(poll);
            let received = match &self.markers {
                Some(rx) => rx.recv_timeout(wait),
                None => Err(RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(marker) => self.observe(marker),
                Err(RecvTimeoutError::Timeout) => {}
                // stdout closed; the exit check below decides.
                Err(RecvTimeoutError::Disconnected) => thread::sleep(wait),
            }

            if let Some(status) = self.exit_status() {
                warn!(kind = %self.kind, id = %self.id, %status, logs = %self.logs_tail(20), "exited before ready");
                self.kill();
                return Err(HarnessError::ExitedEarly {
                    kind: self.kind,
                    id: self.id.clone(),
                    status,
                });
            }
        }
    }

    /// Terminate the process group: SIGTERM, up to the grace period for the
    /// leader to exit, then SIGKILL. Descendants still running once the
    /// leader is reaped are killed too.
    ///
    /// Idempotent and infallible. Failures are logged. Always leaves the
    /// component `Stopped`.
    pub fn kill(&mut self) {
        if self.state == ComponentState::Stopped {
            return;
        }
        let previous = self.state;
        self.state = ComponentState::Stopped;
        self.addr = None;
        self.markers = None;

        let Some(mut child) = self.child.take() else {
            debug!(kind = %self.kind, id = %self.id, "stopped before launch");
            return;
        };

        terminate(&mut child, self.config.kill_grace, self.config.poll_interval);
        info!(kind = %self.kind, id = %self.id, from = %previous, "component stopped");
    }

    /// Address of this component for a dependent that is about to launch.
    ///
    /// Requires `Ready` and a live process.
    pub(crate) fn dependency_addr(&self, dependent: ComponentKind) -> HarnessResult<SocketAddr> {
        let addr = self.addr().ok_or(HarnessError::DependencyNotReady {
            kind: dependent,
            dependency: self.kind,
            state: self.state,
        })?;
        if !self.is_alive() {
            return Err(HarnessError::DependencyExited {
                kind: dependent,
                dependency: self.kind,
                id: self.id.clone(),
            });
        }
        Ok(addr)
    }

    fn expect_state(&self, expected: ComponentState) -> HarnessResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(HarnessError::InvalidState {
                kind: self.kind,
                id: self.id.clone(),
                expected,
                actual: self.state,
            })
        }
    }

    fn observe(&mut self, marker: Marker) {
        debug!(kind = %self.kind, id = %self.id, %marker, "marker");
        if let Marker::Listening(addr) = &marker {
            self.addr = Some(*addr);
        }
        self.seen.push(marker);
    }

    fn readiness_observed(&self) -> bool {
        let registered = || self.seen.iter().any(|m| matches!(m, Marker::Registered { .. }));
        let running = || self.seen.iter().any(|m| matches!(m, Marker::TaskRunning { .. }));
        match self.kind {
            ComponentKind::Master => self.addr.is_some(),
            ComponentKind::Agent => self.addr.is_some() && registered(),
            ComponentKind::Task => running(),
        }
    }

    // The master has no registration step, so readiness also needs a
    // successful connect.
    fn accepting(&self, timeout: Duration) -> bool {
        match (self.kind, self.addr) {
            (ComponentKind::Master, Some(addr)) => {
                let timeout = timeout.max(Duration::from_millis(10));
                match TcpStream::connect_timeout(&addr, timeout) {
                    Ok(_) => true,
                    Err(e) => {
                        debug!(id = %self.id, %addr, error = %e, "not accepting yet");
                        false
                    }
                }
            }
            _ => true,
        }
    }

    fn exit_status(&mut self) -> Option<String> {
        let child = self.child.as_mut()?;
        match child.try_wait() {
            Ok(Some(status)) => Some(status.to_string()),
            Ok(None) => None,
            Err(e) => {
                warn!(id = %self.id, error = %e, "failed to poll process");
                None
            }
        }
    }
}

impl Drop for ProcessComponent {
    fn drop(&mut self) {
        self.kill();
    }
}

fn spawn_readers(
    child: &mut Child,
    id: &str,
    stdout_log: File,
    stderr_log: File,
) -> io::Result<Receiver<Marker>> {
    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        thread::Builder::new()
            .name(format!("{id}-stdout"))
            .spawn(move || tee_lines(stdout, stdout_log, Some(&tx)))?;
    }
    if let Some(stderr) = child.stderr.take() {
        thread::Builder::new()
            .name(format!("{id}-stderr"))
            .spawn(move || tee_lines(stderr, stderr_log, None))?;
    }
    Ok(rx)
}

fn tee_lines(source: impl Read, mut log: File, markers: Option<&Sender<Marker>>) {
    for line in BufReader::new(source).lines().map_while(Result::ok) {
        let _ = writeln!(log, "{line}");
        if let Some(tx) = markers {
            if let Ok(marker) = line.parse::<Marker>() {
                // The receiver goes away on kill; keep draining the pipe.
                let _ = tx.send(marker);
            }
        }
    }
}

fn terminate(child: &mut Child, grace: Duration, poll: Duration) {
    let pid = child.id();
    let group = i32::try_from(pid).ok().map(Pid::from_raw);

    let mut descendants = Descendants::default();
    match child.try_wait() {
        Ok(Some(status)) => debug!(pid, %status, "already exited"),
        Ok(None) => {
            descendants = Descendants::of(pid);
            signal_group(group, Signal::SIGTERM);
            if !wait_for_exit(child, grace, poll) {
                warn!(pid, ?grace, "still running after grace period, sending SIGKILL");
                signal_group(group, Signal::SIGKILL);
            }
        }
        Err(e) => {
            warn!(pid, error = %e, "failed to poll process");
            signal_group(group, Signal::SIGKILL);
        }
    }

    if let Err(e) = child.wait() {
        warn!(pid, error = %e, "failed to reap process");
    }

    // Whatever ignored SIGTERM in the group, and anything that left it.
    signal_group(group, Signal::SIGKILL);
    descendants.kill_survivors();
}

fn wait_for_exit(child: &mut Child, grace: Duration, poll: Duration) -> bool {
    let deadline = Instant::now() + grace;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "exited after SIGTERM");
                return true;
            }
            Ok(None) if Instant::now() < deadline => thread::sleep(poll),
            Ok(None) => return false,
            Err(e) => {
                warn!(pid = child.id(), error = %e, "failed to poll process");
                return false;
            }
        }
    }
}

fn signal_group(group: Option<Pid>, signal: Signal) {
    let Some(group) = group else {
        warn!(?signal, "pid out of range, cannot signal group");
        return;
    };
    match killpg(group, signal) {
        Ok(()) => debug!(%group, ?signal, "signalled process group"),
        // No member left.
        Err(Errno::ESRCH) => {}
        Err(e) => warn!(%group, ?signal, error = %e, "failed to signal process group"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HarnessConfig {
        HarnessConfig::default()
            .with_launch_timeout(Duration::from_secs(5))
            .with_kill_grace(Duration::from_millis(500))
            .with_poll_interval(Duration::from_millis(10))
    }

    fn shell(kind: ComponentKind, script: &str) -> ProcessComponent {
        let args = vec!["-c".to_string(), script.to_string()];
        ProcessComponent::new(kind, format!("{kind}-test"), "sh", args, &config())
    }

    #[test]
    fn kill_before_launch_stops() {
        let mut component = shell(ComponentKind::Task, "sleep 30");
        component.kill();
        assert_eq!(component.state(), ComponentState::Stopped);
        assert!(component.spawn().is_err());
    }

    #[test]
    fn task_ready_after_marker() {
        let mut component = shell(
            ComponentKind::Task,
            "echo hello; echo TASK_RUNNING t-1 c-1; exec sleep 30",
        );
        component.launch().unwrap();

        assert_eq!(component.state(), ComponentState::Ready);
        assert!(component.pid().is_some());
        assert_eq!(
            component.markers(),
            &[Marker::TaskRunning {
                task_id: "t-1".into(),
                container_id: "c-1".into()
            }]
        );
        // Tasks have no address of their own.
        assert_eq!(component.addr(), None);

        component.kill();
        assert_eq!(component.state(), ComponentState::Stopped);
        assert_eq!(component.pid(), None);
    }

    #[test]
    fn spawn_then_await_ready_is_observable() {
        let mut component = shell(
            ComponentKind::Task,
            "sleep 0.2; echo TASK_RUNNING t c; exec sleep 30",
        );
        component.spawn().unwrap();
        assert_eq!(component.state(), ComponentState::Starting);

        component.await_ready().unwrap();
        assert_eq!(component.state(), ComponentState::Ready);
    }

    #[test]
    fn await_ready_requires_starting() {
        let mut component = shell(ComponentKind::Task, "sleep 30");
        let err = component.await_ready().unwrap_err();
        assert!(matches!(
            err,
            HarnessError::InvalidState {
                expected: ComponentState::Starting,
                actual: ComponentState::Unlaunched,
                ..
            }
        ));
    }

    #[test]
    fn logs_capture_both_streams() {
        let mut component = shell(
            ComponentKind::Task,
            "echo to-stderr >&2; echo TASK_RUNNING t c; exec sleep 30",
        );
        component.launch().unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !component.logs_tail(10).contains("to-stderr") {
            assert!(Instant::now() < deadline, "stderr never logged");
            thread::sleep(Duration::from_millis(10));
        }

        let tail = component.logs_tail(10);
        assert!(tail.contains("TASK_RUNNING t c"));
        assert!(tail.contains("--- task task-test stderr ---"));
        let (stdout, stderr) = component.log_paths().unwrap();
        assert!(stdout.exists() && stderr.exists());
    }

    fn read_pid(path: &Path) -> i32 {
        crate::poll_until(Duration::from_millis(10), Duration::from_secs(5), || {
            fs::read_to_string(path)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .ok_or("pid file never written")
        })
        .unwrap()
    }

    // An orphan is reaped by whatever init the test runs under, so a zombie
    // counts as gone.
    fn running(pid: i32) -> bool {
        if nix::sys::signal::kill(Pid::from_raw(pid), None).is_err() {
            return false;
        }
        fs::read_to_string(format!("/proc/{pid}/stat")).map_or(true, |stat| {
            stat.rsplit_once(')')
                .and_then(|(_, rest)| rest.trim_start().chars().next())
                != Some('Z')
        })
    }

    fn assert_gone(pid: i32) {
        crate::poll_until(Duration::from_millis(10), Duration::from_secs(5), || {
            if running(pid) { Err(pid) } else { Ok(()) }
        })
        .unwrap_or_else(|pid| panic!("process {pid} survived kill"));
    }

    #[test]
    fn kill_takes_down_grandchildren() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!(
            "sleep 1000 & echo $! > {}; trap '' TERM; echo TASK_RUNNING t c; wait",
            pid_file.display()
        );
        let mut component = shell(ComponentKind::Task, &script);
        component.launch().unwrap();
        let grandchild = read_pid(&pid_file);
        assert!(running(grandchild));

        component.kill();
        assert_gone(grandchild);
    }

    #[test]
    fn kill_sweeps_descendants_in_other_groups() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("detached.pid");
        let script = format!(
            "setsid sleep 1000 & echo $! > {}; echo TASK_RUNNING t c; wait",
            pid_file.display()
        );
        let mut component = shell(ComponentKind::Task, &script);
        component.launch().unwrap();
        let detached = read_pid(&pid_file);

        // Wait for the exec so the new session is in place before killing.
        crate::poll_until(Duration::from_millis(10), Duration::from_secs(5), || {
            let group = nix::unistd::getpgid(Some(Pid::from_raw(detached)));
            match group {
                Ok(group) if group.as_raw() == detached => Ok(()),
                other => Err(other),
            }
        })
        .unwrap();

        component.kill();
        assert_gone(detached);
    }

    #[test]
    fn self_exit_is_not_alive_but_stays_ready() {
        let mut component = shell(ComponentKind::Task, "echo TASK_RUNNING t c; exit 0");
        component.launch().unwrap();
        assert_eq!(component.state(), ComponentState::Ready);

        crate::poll_until(Duration::from_millis(10), Duration::from_secs(5), || {
            if component.is_alive() { Err(()) } else { Ok(()) }
        })
        .unwrap();
        assert_eq!(component.state(), ComponentState::Ready);
        // Not reaped by the liveness check.
        assert!(component.pid().is_some());

        component.kill();
        assert_eq!(component.state(), ComponentState::Stopped);
        assert!(!component.is_alive());
    }

    #[test]
    fn exited_dependency_is_rejected() {
        let mut master = shell(ComponentKind::Master, "exit 0");
        master.spawn().unwrap();
        // As if LISTENING had been seen before the exit.
        master.state = ComponentState::Ready;
        master.addr = Some("127.0.0.1:5050".parse().unwrap());

        crate::poll_until(Duration::from_millis(10), Duration::from_secs(5), || {
            if master.is_alive() { Err(()) } else { Ok(()) }
        })
        .unwrap();

        let err = master.dependency_addr(ComponentKind::Agent).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::DependencyExited {
                kind: ComponentKind::Agent,
                dependency: ComponentKind::Master,
                ..
            }
        ));
    }

    #[test]
    fn missing_binary_is_launch_error() {
        let mut component = ProcessComponent::new(
            ComponentKind::Master,
            "master-missing",
            "/nonexistent/claw-master",
            Vec::new(),
            &config(),
        );
        let err = component.launch().unwrap_err();
        assert!(matches!(err, HarnessError::Launch { .. }));
        assert_eq!(component.state(), ComponentState::Stopped);
    }
}
