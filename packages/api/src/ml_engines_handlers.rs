// ABOUTME: HTTP request handlers for ML engine operations
// ABOUTME: Register and list provider engines; API keys never leave the server

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use mindgate_engines::{MlEngine, MlEngineCreate};
use tracing::info;

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

pub async fn create_ml_engine(
    State(state): State<AppState>,
    payload: Result<Json<MlEngineCreate>, JsonRejection>,
) -> ApiResult<Json<MlEngine>> {
    let Json(request) = payload?;
    info!("Creating ML engine: {} ({})", request.name, request.provider);

    state
        .engines
        .create(request)
        .await
        .map(Json)
        .map_err(|e| AppError::from_service(e, "Failed to create ML engine"))
}

pub async fn list_ml_engines(State(state): State<AppState>) -> Json<Vec<MlEngine>> {
    info!("Listing ML engines");
    Json(state.engines.list().await)
}
