//! Component lifecycle against fake binaries.

mod helpers;

use std::time::{Duration, Instant};

use claw_testkit::{
    Agent, ComponentState, HarnessError, Master, ProcessComponent, Task, TaskSpec, TestCluster,
    poll_until,
};
use helpers::*;

/// Log files are written by background threads; wait for `needle`.
fn wait_for_log(component: &ProcessComponent, needle: &str) {
    poll_until(Duration::from_millis(10), Duration::from_secs(5), || {
        let tail = component.logs_tail(10);
        if tail.contains(needle) { Ok(()) } else { Err(tail) }
    })
    .unwrap_or_else(|tail| panic!("{needle:?} not in logs:\n{tail}"));
}

// ============================================================================
// Readiness
// ============================================================================

#[test]
fn test_master_ready_after_listening_and_connect() {
    let config = fake_config();
    let master = Master::launch(&config).unwrap();

    assert_eq!(master.state(), ComponentState::Ready);
    assert_eq!(master.addr(), Some(FAKES.listener.local_addr().unwrap()));
    assert!(master.id().starts_with("master-"));
}

#[test]
fn test_agent_ready_after_registration() {
    let config = fake_config();
    let master = Master::launch(&config).unwrap();
    let agent = Agent::launch(&config, &master).unwrap();

    assert_eq!(agent.state(), ComponentState::Ready);
    assert_eq!(agent.master_addr(), master.addr().unwrap());
    assert!(agent.id().starts_with("agent-"));
    let expected = format!("--master {}", master.addr().unwrap());
    wait_for_log(&agent, &expected);
}

#[test]
fn test_agent_without_registration_times_out() {
    let config = fake_config();
    let master = Master::launch(&config).unwrap();
    let config = config
        .with_agent_bin(FAKES.bin("agent-unregistered"))
        .with_launch_timeout(Duration::from_millis(300));

    let mut agent = Agent::new(&config, &master).unwrap();
    let err = agent.launch().unwrap_err();

    assert!(matches!(err, HarnessError::LaunchTimeout { .. }));
    assert_eq!(agent.state(), ComponentState::Stopped);
    assert_eq!(agent.addr(), None);
}

#[test]
fn test_task_records_container() {
    let config = fake_config();
    let master = Master::launch(&config).unwrap();
    let agent = Agent::launch(&config, &master).unwrap();
    let task = Task::launch(&config, &agent, TaskSpec::command("sleep 1000")).unwrap();

    assert_eq!(task.state(), ComponentState::Ready);
    assert_eq!(task.container_id(), Some("fake-container"));
    assert!(task.task_id().starts_with("task-"));
    wait_for_log(&task, "--command sleep 1000");
}

// ============================================================================
// Launch failures
// ============================================================================

#[test]
fn test_launch_timeout_reaps_process() {
    let config = fake_config()
        .with_master_bin(FAKES.bin("master-silent"))
        .with_launch_timeout(Duration::from_millis(300));

    let mut master = Master::new(&config);
    master.spawn().unwrap();
    let pid = master.pid().unwrap();

    let started = Instant::now();
    let err = master.await_ready().unwrap_err();

    assert!(matches!(err, HarnessError::LaunchTimeout { .. }));
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(master.state(), ComponentState::Stopped);
    assert!(!process_exists(pid), "timed out process was not reaped");
}

#[test]
fn test_master_not_accepting_is_not_ready() {
    let config = fake_config()
        .with_master_bin(FAKES.bin("master-closed-port"))
        .with_launch_timeout(Duration::from_millis(300));

    let err = Master::launch(&config).unwrap_err();
    assert!(matches!(err, HarnessError::LaunchTimeout { .. }));
}

#[test]
fn test_early_exit_is_launch_error() {
    let config = fake_config().with_master_bin(FAKES.bin("master-crash"));

    let mut master = Master::new(&config);
    let err = master.launch().unwrap_err();

    match err {
        HarnessError::ExitedEarly { status, .. } => assert!(status.contains('3'), "{status}"),
        other => panic!("expected ExitedEarly, got {other}"),
    }
    assert_eq!(master.state(), ComponentState::Stopped);
    wait_for_log(&master, "starting");
}

// ============================================================================
// Dependency ordering
// ============================================================================

#[test]
fn test_agent_requires_ready_master() {
    let config = fake_config().with_master_bin(FAKES.bin("master-silent"));

    let mut master = Master::new(&config);
    master.spawn().unwrap();
    assert_eq!(master.state(), ComponentState::Starting);

    let err = Agent::launch(&config, &master).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::DependencyNotReady {
            state: ComponentState::Starting,
            ..
        }
    ));
}

#[test]
fn test_task_requires_ready_agent() {
    let config = fake_config();
    let master = Master::launch(&config).unwrap();
    let mut agent = Agent::launch(&config, &master).unwrap();
    agent.kill();

    let err = Task::new(&config, &agent, TaskSpec::command("true")).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::DependencyNotReady {
            state: ComponentState::Stopped,
            ..
        }
    ));
}

#[test]
fn test_agent_new_after_master_killed() {
    let config = fake_config();
    let mut master = Master::launch(&config).unwrap();
    master.kill();

    let err = Agent::new(&config, &master).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::DependencyNotReady {
            state: ComponentState::Stopped,
            ..
        }
    ));
}

#[test]
fn test_agent_rejects_master_that_exited() {
    let config = fake_config().with_master_bin(FAKES.bin("master-exits"));
    let master = Master::launch(&config).unwrap();

    poll_until(Duration::from_millis(10), Duration::from_secs(5), || {
        if master.is_alive() { Err(()) } else { Ok(()) }
    })
    .expect("master never exited");
    // Nothing went through the handle, so the state is unchanged.
    assert_eq!(master.state(), ComponentState::Ready);

    let err = Agent::launch(&config, &master).unwrap_err();
    assert!(matches!(err, HarnessError::DependencyExited { .. }), "{err}");
}

// ============================================================================
// Kill
// ============================================================================

#[test]
fn test_kill_twice_stays_stopped() {
    let config = fake_config();
    let mut master = Master::launch(&config).unwrap();
    let pid = master.pid().unwrap();

    master.kill();
    assert_eq!(master.state(), ComponentState::Stopped);
    assert_eq!(master.addr(), None);
    assert!(!process_exists(pid));

    master.kill();
    assert_eq!(master.state(), ComponentState::Stopped);
}

#[test]
fn test_stopped_never_returns_to_ready() {
    let config = fake_config();
    let mut master = Master::launch(&config).unwrap();
    master.kill();

    assert!(matches!(
        master.spawn(),
        Err(HarnessError::InvalidState { actual: ComponentState::Stopped, .. })
    ));
    assert!(master.await_ready().is_err());
    assert!(master.launch().is_err());
    assert_eq!(master.state(), ComponentState::Stopped);
}

#[test]
fn test_kill_escalates_to_sigkill() {
    let config = fake_config()
        .with_execute_bin(FAKES.bin("execute-stubborn"))
        .with_kill_grace(Duration::from_millis(200));
    let master = Master::launch(&config).unwrap();
    let agent = Agent::launch(&config, &master).unwrap();
    let mut task = Task::launch(&config, &agent, TaskSpec::command("ignored")).unwrap();
    let pid = task.pid().unwrap();

    let started = Instant::now();
    task.kill();

    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(task.state(), ComponentState::Stopped);
    assert!(!process_exists(pid));
}

#[test]
fn test_drop_kills_process() {
    let config = fake_config();
    let pid = {
        let master = Master::launch(&config).unwrap();
        master.pid().unwrap()
    };
    assert!(!process_exists(pid));
}

// ============================================================================
// TestCluster
// ============================================================================

#[test]
fn test_cluster_launch_and_shutdown() {
    let mut cluster = TestCluster::with_agent(fake_config()).unwrap();
    cluster
        .launch_task(0, TaskSpec::command("sleep 1000"))
        .unwrap();

    let pids: Vec<u32> = [
        cluster.master().pid(),
        cluster.agents()[0].pid(),
        cluster.tasks()[0].pid(),
    ]
    .into_iter()
    .map(Option::unwrap)
    .collect();

    assert!(cluster.logs_tail(3).contains("--- task"));
    cluster.shutdown();

    assert_eq!(cluster.master().state(), ComponentState::Stopped);
    assert_eq!(cluster.agents()[0].state(), ComponentState::Stopped);
    assert_eq!(cluster.tasks()[0].state(), ComponentState::Stopped);
    assert!(pids.into_iter().all(|pid| !process_exists(pid)));
}

#[test]
fn test_cluster_unknown_agent_index() {
    let mut cluster = TestCluster::start(fake_config()).unwrap();
    let err = cluster
        .launch_task(0, TaskSpec::command("sleep 1000"))
        .unwrap_err();
    assert!(matches!(
        err,
        HarnessError::NoSuchAgent {
            index: 0,
            launched: 0
        }
    ));
}
