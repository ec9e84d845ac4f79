//! HTTP client used by the agent and the task launcher to reach their peers.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ClusterError, ClusterResult};
use crate::types::{AgentInfo, ContainerInfo, LaunchTask, RegisterAgent};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Normalise `addr` (`host:port`, or an `http://` or `https://` URL) into a
/// base URL without a trailing slash.
///
/// # Errors
///
/// Returns [`ClusterError::InvalidRequest`] if the address is empty or uses
/// another scheme.
pub fn base_url(addr: &str) -> ClusterResult<String> {
    let addr = addr.trim().trim_end_matches('/');
    if addr.is_empty() {
        return Err(ClusterError::InvalidRequest("address cannot be empty".into()));
    }

    if addr.starts_with("http://") || addr.starts_with("https://") {
        Ok(addr.to_string())
    } else if addr.contains("://") {
        Err(ClusterError::InvalidRequest(format!(
            "invalid address: {addr}, expected host:port or http://host:port"
        )))
    } else {
        Ok(format!("http://{addr}"))
    }
}

/// Client for one master or agent.
#[derive(Debug, Clone)]
pub struct PeerClient {
    http: Client,
    base_url: String,
}

impl PeerClient {
    /// Create a client for `addr` (`host:port` or a full `http://` URL).
    ///
    /// # Errors
    ///
    /// Returns an error if the address is rejected by [`base_url`] or the
    /// HTTP client cannot be built.
    pub fn new(addr: &str, timeout: Duration) -> ClusterResult<Self> {
        let base_url = base_url(addr)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClusterError::Internal(format!("http client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Register an agent with the master.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the master rejects it.
    pub async fn register_agent(&self, request: &RegisterAgent) -> ClusterResult<AgentInfo> {
        let url = self.url("agents");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClusterError::peer(&url, e))?;
        decode(&url, response).await
    }

    /// Register, retrying while the master is unreachable.
    ///
    /// # Errors
    ///
    /// Returns the last error once `attempts` tries have failed.
    pub async fn register_agent_with_retry(
        &self,
        request: &RegisterAgent,
        attempts: u32,
        interval: Duration,
    ) -> ClusterResult<AgentInfo> {
        let mut attempt = 1;
        loop {
            match self.register_agent(request).await {
                Ok(agent) => return Ok(agent),
                Err(e) if attempt < attempts => {
                    debug!(attempt, error = %e, "registration failed, retrying");
                    attempt += 1;
                    tokio::time::sleep(interval).await;
                }
                Err(e) => {
                    warn!(attempts, error = %e, "registration failed");
                    return Err(e);
                }
            }
        }
    }

    /// Remove an agent from the master.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the agent is unknown.
    pub async fn unregister_agent(&self, agent_id: &str) -> ClusterResult<AgentInfo> {
        let url = self.url(&format!("agents/{agent_id}"));
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| ClusterError::peer(&url, e))?;
        decode(&url, response).await
    }

    /// Ask the agent to launch a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the agent rejects the task.
    pub async fn launch_task(&self, task: &LaunchTask) -> ClusterResult<ContainerInfo> {
        let url = self.url("tasks");
        let response = self
            .http
            .post(&url)
            .json(task)
            .send()
            .await
            .map_err(|e| ClusterError::peer(&url, e))?;
        decode(&url, response).await
    }

    /// Ask the agent to kill a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the task is unknown.
    pub async fn kill_task(&self, task_id: &str) -> ClusterResult<ContainerInfo> {
        let url = self.url(&format!("tasks/{task_id}"));
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| ClusterError::peer(&url, e))?;
        decode(&url, response).await
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ClusterResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClusterError::peer(url, format!("HTTP {status}: {body}")));
    }
    response
        .json()
        .await
        .map_err(|e| ClusterError::peer(url, format!("invalid response body: {e}")))
}
