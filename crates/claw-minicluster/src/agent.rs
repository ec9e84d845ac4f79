//! Agent: hosts task containers and reports them over HTTP.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::containerizer::Containerizer;
use crate::error::ClusterResult;
use crate::types::{ContainerInfo, Health, LaunchTask};

/// Shared agent state.
#[derive(Debug)]
pub struct AgentState {
    agent_id: String,
    containerizer: Containerizer,
}

impl AgentState {
    /// Create an agent with no containers.
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            containerizer: Containerizer::new(),
        }
    }

    /// Agent identifier.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// The agent's containers.
    pub fn containerizer(&self) -> &Containerizer {
        &self.containerizer
    }
}

/// Query parameters for `GET /containers`.
#[derive(Debug, Default, Deserialize)]
pub struct ContainerQuery {
    /// Only report this container.
    pub container_id: Option<String>,
}

/// Build the agent's HTTP router.
pub fn router(state: Arc<AgentState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/containers", get(list_containers))
        .route("/tasks", post(launch_task))
        .route("/tasks/{task_id}", delete(kill_task))
        .with_state(state)
}

async fn health(State(state): State<Arc<AgentState>>) -> Json<Health> {
    Json(Health {
        status: "ok".into(),
        role: "agent".into(),
        id: state.agent_id.clone(),
    })
}

async fn list_containers(
    State(state): State<Arc<AgentState>>,
    Query(query): Query<ContainerQuery>,
) -> Json<Vec<ContainerInfo>> {
    Json(
        state
            .containerizer
            .containers(query.container_id.as_deref()),
    )
}

async fn launch_task(
    State(state): State<Arc<AgentState>>,
    Json(task): Json<LaunchTask>,
) -> ClusterResult<(StatusCode, Json<ContainerInfo>)> {
    let info = state.containerizer.launch(&task)?;
    Ok((StatusCode::CREATED, Json(info)))
}

async fn kill_task(
    State(state): State<Arc<AgentState>>,
    Path(task_id): Path<String>,
) -> ClusterResult<Json<ContainerInfo>> {
    state.containerizer.destroy(&task_id).await.map(Json)
}
