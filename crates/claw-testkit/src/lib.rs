//! Test harness for Clawbernetes end-to-end tests.
//!
//! - [`Master`], [`Agent`] and [`Task`] supervise the minicluster binaries
//!   through the [`ProcessComponent`] lifecycle:
//!   `Unlaunched -> Starting -> Ready -> Stopped`.
//! - [`TestCluster`] owns a set of components and tears them down in
//!   reverse dependency order.
//! - [`capture`] collects what an operation writes to its output sink.
//! - [`HttpProbe`] reads component endpoints directly as a test oracle.
//!
//! ```no_run
//! use claw_testkit::{HarnessConfig, TaskSpec, TestCluster};
//!
//! let mut cluster = TestCluster::with_agent(HarnessConfig::from_env())?;
//! let task = cluster.launch_task(0, TaskSpec::command("sleep 1000"))?;
//! assert!(task.container_id().is_some());
//! # Ok::<(), claw_testkit::HarnessError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod capture;
pub mod cluster;
pub mod component;
pub mod config;
pub mod error;
pub mod master;
pub mod probe;
mod process_tree;
pub mod task;
pub mod wait;

pub use agent::Agent;
pub use capture::{CaptureFailure, CapturedOutput, capture, try_capture};
pub use cluster::TestCluster;
pub use component::{ComponentKind, ComponentState, ProcessComponent};
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult, ProbeError, ProbeResult};
pub use master::Master;
pub use probe::{HttpProbe, get_json};
pub use task::{Task, TaskSpec};
pub use wait::poll_until;
