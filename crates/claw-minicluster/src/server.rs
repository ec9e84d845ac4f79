//! Listener setup, serving, and shutdown signals shared by the binaries.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::{ClusterError, ClusterResult};

/// Bind `addr` and return the listener with its actual local address.
///
/// Binding port 0 picks a free ephemeral port.
///
/// # Errors
///
/// Returns [`ClusterError::BindFailed`] if the address cannot be bound.
pub async fn bind(addr: SocketAddr) -> ClusterResult<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ClusterError::BindFailed(addr, e))?;
    let local = listener.local_addr()?;
    Ok((listener, local))
}

/// Serve `router` on `listener` until `shutdown` completes.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> ClusterResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(addr = %addr, "serving");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ClusterError::Internal(e.to_string()))?;

    info!(addr = %addr, "server shut down");
    Ok(())
}

/// Resolve once SIGTERM or SIGINT is received.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = term.recv() => info!("received SIGTERM"),
                    _ = tokio::signal::ctrl_c() => info!("received SIGINT"),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for SIGINT");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("received Ctrl-C");
    }
}
