//! `claw-master`: serves the agent registry until SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use claw_minicluster::config::MasterArgs;
use claw_minicluster::{Marker, MasterState, init_tracing, master, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = MasterArgs::parse();

    let state = Arc::new(MasterState::new(args.master_id()));
    let (listener, addr) = server::bind(args.listen).await?;
    info!(master_id = %state.master_id(), addr = %addr, "master started");

    Marker::Listening(addr)
        .announce()
        .context("failed to announce readiness")?;

    server::serve(listener, master::router(state), server::shutdown_signal()).await?;
    Ok(())
}
