//! `claw-agent`: registers with the master and runs tasks until SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{info, warn};

use claw_minicluster::config::AgentArgs;
use claw_minicluster::{
    AgentState, DEFAULT_REQUEST_TIMEOUT, Marker, PeerClient, RegisterAgent, agent, init_tracing,
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = AgentArgs::parse();

    let state = Arc::new(AgentState::new(args.agent_id()));
    let (listener, addr) = server::bind(args.listen).await?;
    Marker::Listening(addr)
        .announce()
        .context("failed to announce listener")?;

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        tokio::select! {
            () = server::shutdown_signal() => {}
            _ = stop_rx => {}
        }
    };
    let server_task = tokio::spawn(server::serve(listener, agent::router(state.clone()), shutdown));

    let master = PeerClient::new(&args.master, DEFAULT_REQUEST_TIMEOUT)?;
    let request = RegisterAgent {
        agent_id: state.agent_id().to_string(),
        addr: addr.to_string(),
    };
    let registered = master
        .register_agent_with_retry(&request, args.register_attempts, args.register_interval())
        .await;

    match registered {
        Ok(info) => {
            info!(agent_id = %info.agent_id, master = %master.base_url(), "registered with master");
            Marker::Registered {
                agent_id: info.agent_id,
            }
            .announce()
            .context("failed to announce registration")?;
        }
        Err(e) => {
            let _ = stop_tx.send(());
            let _ = server_task.await;
            return Err(e).context("could not register with master");
        }
    }

    // Holding stop_tx keeps the server up until a signal arrives.
    let served = server_task.await.context("server task panicked")?;
    drop(stop_tx);

    state.containerizer().destroy_all().await;
    if let Err(e) = master.unregister_agent(state.agent_id()).await {
        warn!(error = %e, "failed to unregister from master");
    }
    info!(agent_id = %state.agent_id(), "agent stopped");

    served?;
    Ok(())
}
