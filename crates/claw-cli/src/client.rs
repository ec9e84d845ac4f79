//! HTTP client for agent and master endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use claw_cli::client::{ContainerClient, HttpClient};
//!
//! # async fn example() -> Result<(), claw_cli::CliError> {
//! let agent = HttpClient::new("127.0.0.1:5051", Duration::from_secs(5))?;
//! let containers = agent.list_containers(None).await?;
//! println!("containers: {}", containers.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use claw_minicluster::{AgentInfo, ContainerInfo, client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CliError;

/// Source of an agent's containers.
pub trait ContainerClient: Send + Sync {
    /// List containers, optionally only the one with `container_id`.
    fn list_containers(
        &self,
        container_id: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ContainerInfo>, CliError>> + Send;
}

/// Source of a master's agent registry.
pub trait AgentClient: Send + Sync {
    /// List registered agents.
    fn list_agents(&self) -> impl Future<Output = Result<Vec<AgentInfo>, CliError>> + Send;
}

/// JSON-over-HTTP client for one component.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for `addr` (`host:port` or an `http(s)://` URL).
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty or uses another scheme.
    pub fn new(addr: &str, timeout: Duration) -> Result<Self, CliError> {
        let base_url =
            client::base_url(addr).map_err(|e| CliError::InvalidArgument(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CliError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Base URL requests go to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CliError> {
        let url = format!("{}/{path}", self.base_url);
        debug!(url = %url, ?query, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| CliError::Connection(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CliError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CliError::Format(format!("invalid response from {url}: {e}")))
    }
}

impl ContainerClient for HttpClient {
    async fn list_containers(
        &self,
        container_id: Option<&str>,
    ) -> Result<Vec<ContainerInfo>, CliError> {
        match container_id {
            Some(id) => self.get_json("containers", &[("container_id", id)]).await,
            None => self.get_json("containers", &[]).await,
        }
    }
}

impl AgentClient for HttpClient {
    async fn list_agents(&self) -> Result<Vec<AgentInfo>, CliError> {
        self.get_json("agents", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;

    use claw_minicluster::{AgentState, LaunchTask, MasterState, RegisterAgent, agent, master, server};

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn spawn_router(router: axum::Router) -> SocketAddr {
        let (listener, addr) = server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        tokio::spawn(server::serve(listener, router, std::future::pending()));
        addr
    }

    fn sleeper(task_id: &str) -> LaunchTask {
        LaunchTask {
            task_id: task_id.into(),
            name: task_id.into(),
            framework_id: "framework-1".into(),
            command: "sleep 1000".into(),
        }
    }

    #[test]
    fn new_adds_scheme() {
        let client = HttpClient::new("127.0.0.1:5051", TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5051");
    }

    #[test]
    fn new_keeps_http_url_and_trims_slash() {
        let client = HttpClient::new("http://127.0.0.1:5051/", TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5051");
    }

    #[test]
    fn new_rejects_other_schemes() {
        let err = HttpClient::new("ws://127.0.0.1:5051", TIMEOUT).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn new_accepts_https() {
        let client = HttpClient::new("https://agent.local:5051", TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "https://agent.local:5051");
    }

    #[test]
    fn new_rejects_empty() {
        assert!(HttpClient::new("  ", TIMEOUT).is_err());
    }

    #[tokio::test]
    async fn list_containers_from_agent() {
        let state = Arc::new(AgentState::new("agent-1"));
        let launched = state.containerizer().launch(&sleeper("task-1")).unwrap();
        state.containerizer().launch(&sleeper("task-2")).unwrap();
        let addr = spawn_router(agent::router(Arc::clone(&state))).await;

        let client = HttpClient::new(&addr.to_string(), TIMEOUT).unwrap();
        assert_eq!(client.list_containers(None).await.unwrap().len(), 2);

        let only = client
            .list_containers(Some(&launched.container_id))
            .await
            .unwrap();
        assert_eq!(only, vec![launched]);

        state.containerizer().destroy_all().await;
    }

    #[tokio::test]
    async fn list_agents_from_master() {
        let state = Arc::new(MasterState::new("master-1"));
        state
            .register(RegisterAgent {
                agent_id: "agent-1".into(),
                addr: "127.0.0.1:5051".into(),
            })
            .unwrap();
        let addr = spawn_router(master::router(state)).await;

        let client = HttpClient::new(&addr.to_string(), TIMEOUT).unwrap();
        let agents = client.list_agents().await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].agent_id, "agent-1");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let addr = spawn_router(axum::Router::new()).await;
        let client = HttpClient::new(&addr.to_string(), TIMEOUT).unwrap();

        let err = client.list_agents().await.unwrap_err();
        assert!(matches!(err, CliError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn unreachable_is_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(&addr.to_string(), TIMEOUT).unwrap();
        let err = client.list_containers(None).await.unwrap_err();
        assert!(matches!(err, CliError::Connection(_)));
    }
}
