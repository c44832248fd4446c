// ABOUTME: HTTP request handlers for campaign operations
// ABOUTME: Create and list marketing campaigns

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use mindgate_campaigns::{Campaign, CampaignCreate};
use tracing::info;

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

pub async fn create_campaign(
    State(state): State<AppState>,
    payload: Result<Json<CampaignCreate>, JsonRejection>,
) -> ApiResult<Json<Campaign>> {
    let Json(request) = payload?;
    info!("Received request to create campaign: {}", request.name);

    let campaign = state
        .campaigns
        .create(request)
        .await
        .map_err(|e| AppError::from_service(e, "Failed to create campaign"))?;

    info!("Campaign created successfully: {}", campaign.id);
    Ok(Json(campaign))
}

pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<Campaign>> {
    let campaigns = state.campaigns.list().await;
    info!("Retrieved {} campaigns", campaigns.len());
    Json(campaigns)
}
