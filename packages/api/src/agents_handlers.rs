// ABOUTME: HTTP request handlers for agent operations
// ABOUTME: Create, list and fetch simulated customer agents

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use mindgate_agents::{Agent, AgentCreate};
use tracing::info;

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

pub async fn create_agent(
    State(state): State<AppState>,
    payload: Result<Json<AgentCreate>, JsonRejection>,
) -> ApiResult<Json<Agent>> {
    let Json(request) = payload?;
    info!("Creating agent: {}", request.name);

    state
        .agents
        .create(request)
        .await
        .map(Json)
        .map_err(|e| AppError::from_service(e, "Failed to create agent"))
}

/// List agents; degraded listings come back empty rather than failing
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<Agent>> {
    info!("Listing agents");
    Json(state.agents.list().await)
}

pub async fn get_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> ApiResult<Json<Agent>> {
    info!("Getting agent: {}", agent_id);

    state
        .agents
        .get(&agent_id)
        .await
        .map(Json)
        .map_err(|e| AppError::from_service(e, "Failed to get agent"))
}
