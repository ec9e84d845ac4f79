//! Master: keeps the registry of agents.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::Utc;
use parking_lot::RwLock;
use tracing::info;

use crate::error::{ClusterError, ClusterResult};
use crate::types::{AgentInfo, Health, RegisterAgent};

/// Shared master state.
#[derive(Debug)]
pub struct MasterState {
    master_id: String,
    agents: RwLock<HashMap<String, AgentInfo>>,
}

impl MasterState {
    /// Create a master with no registered agents.
    pub fn new(master_id: impl Into<String>) -> Self {
        Self {
            master_id: master_id.into(),
            agents: RwLock::new(HashMap::new()),
        }
    }

    /// Master identifier.
    pub fn master_id(&self) -> &str {
        &self.master_id
    }

    /// Register or re-register an agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent id is empty or the address is not a
    /// `host:port` socket address.
    pub fn register(&self, request: RegisterAgent) -> ClusterResult<AgentInfo> {
        if request.agent_id.trim().is_empty() {
            return Err(ClusterError::InvalidRequest("agent_id cannot be empty".into()));
        }
        request.addr.parse::<SocketAddr>().map_err(|_| {
            ClusterError::InvalidRequest(format!("invalid agent address: {}", request.addr))
        })?;

        let agent = AgentInfo {
            agent_id: request.agent_id,
            addr: request.addr,
            registered_at: Utc::now(),
        };

        let previous = self
            .agents
            .write()
            .insert(agent.agent_id.clone(), agent.clone());
        if previous.is_some() {
            info!(agent_id = %agent.agent_id, addr = %agent.addr, "agent re-registered");
        } else {
            info!(agent_id = %agent.agent_id, addr = %agent.addr, "agent registered");
        }
        Ok(agent)
    }

    /// Remove an agent.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::NotFound`] if the agent is unknown.
    pub fn unregister(&self, agent_id: &str) -> ClusterResult<AgentInfo> {
        let removed = self
            .agents
            .write()
            .remove(agent_id)
            .ok_or_else(|| ClusterError::NotFound("agent", agent_id.to_string()))?;
        info!(agent_id = %agent_id, "agent unregistered");
        Ok(removed)
    }

    /// Registered agents, oldest registration first.
    pub fn agents(&self) -> Vec<AgentInfo> {
        let mut agents: Vec<AgentInfo> = self.agents.read().values().cloned().collect();
        agents.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.agent_id.cmp(&b.agent_id))
        });
        agents
    }
}

/// Build the master's HTTP router.
pub fn router(state: Arc<MasterState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/agents", get(list_agents).post(register_agent))
        .route("/agents/{agent_id}", delete(unregister_agent))
        .with_state(state)
}

async fn health(State(state): State<Arc<MasterState>>) -> Json<Health> {
    Json(Health {
        status: "ok".into(),
        role: "master".into(),
        id: state.master_id.clone(),
    })
}

async fn list_agents(State(state): State<Arc<MasterState>>) -> Json<Vec<AgentInfo>> {
    Json(state.agents())
}

async fn register_agent(
    State(state): State<Arc<MasterState>>,
    Json(request): Json<RegisterAgent>,
) -> ClusterResult<(StatusCode, Json<AgentInfo>)> {
    let agent = state.register(request)?;
    Ok((StatusCode::CREATED, Json(agent)))
}

async fn unregister_agent(
    State(state): State<Arc<MasterState>>,
    Path(agent_id): Path<String>,
) -> ClusterResult<Json<AgentInfo>> {
    state.unregister(&agent_id).map(Json)
}
