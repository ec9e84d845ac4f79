//! `claw-execute`: launches one task on an agent and kills it on SIGTERM.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use claw_minicluster::config::ExecuteArgs;
use claw_minicluster::{DEFAULT_REQUEST_TIMEOUT, LaunchTask, Marker, PeerClient, init_tracing, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = ExecuteArgs::parse();

    let agent = PeerClient::new(&args.agent, DEFAULT_REQUEST_TIMEOUT)?;
    let task = LaunchTask {
        task_id: args.task_id(),
        name: args.name.clone(),
        framework_id: args.framework_id(),
        command: args.command.clone(),
    };

    let container = agent
        .launch_task(&task)
        .await
        .with_context(|| format!("failed to launch task {}", task.task_id))?;
    info!(
        task_id = %task.task_id,
        container_id = %container.container_id,
        agent = %agent.base_url(),
        "task running"
    );

    Marker::TaskRunning {
        task_id: task.task_id.clone(),
        container_id: container.container_id,
    }
    .announce()
    .context("failed to announce task")?;

    server::shutdown_signal().await;

    if let Err(e) = agent.kill_task(&task.task_id).await {
        warn!(task_id = %task.task_id, error = %e, "failed to kill task");
    }
    Ok(())
}
