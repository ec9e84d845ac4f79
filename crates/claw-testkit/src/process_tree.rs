//! Descendants of a supervised process.
//!
//! A component leads its own process group, but a descendant may leave it
//! (the agent starts every container in a new group). Those are found by
//! walking parent links before the component is signalled, and killed after
//! it has been reaped.

use std::collections::{HashMap, VecDeque};

use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::debug;

/// Processes below a root pid, each with its start time so a recycled pid
/// is never mistaken for the original.
#[derive(Debug, Default)]
pub(crate) struct Descendants {
    processes: Vec<(Pid, u64)>,
}

impl Descendants {
    /// Snapshot every process whose parent chain reaches `root`.
    pub(crate) fn of(root: u32) -> Self {
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All, true);

        let mut children: HashMap<Pid, Vec<Pid>> = HashMap::new();
        for (pid, process) in system.processes() {
            if let Some(parent) = process.parent() {
                children.entry(parent).or_default().push(*pid);
            }
        }

        let mut processes = Vec::new();
        let mut queue = VecDeque::from([Pid::from_u32(root)]);
        while let Some(pid) = queue.pop_front() {
            for child in children.get(&pid).into_iter().flatten() {
                if let Some(process) = system.process(*child) {
                    processes.push((*child, process.start_time()));
                    queue.push_back(*child);
                }
            }
        }
        Self { processes }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// SIGKILL the snapshotted processes that are still running.
    pub(crate) fn kill_survivors(&self) {
        if self.is_empty() {
            return;
        }
        let mut system = System::new();
        let pids: Vec<Pid> = self.processes.iter().map(|(pid, _)| *pid).collect();
        system.refresh_processes(ProcessesToUpdate::Some(&pids), true);

        for (pid, started) in &self.processes {
            match system.process(*pid) {
                Some(process) if process.start_time() == *started => {
                    if process.kill() {
                        debug!(%pid, "killed leftover descendant");
                    }
                }
                _ => {}
            }
        }
    }
}
