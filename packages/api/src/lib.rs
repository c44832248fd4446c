// ABOUTME: HTTP API layer for Mindgate providing REST endpoints and routing
// ABOUTME: Integration layer over the agent, campaign and ML engine services

use axum::{
    routing::{get, post},
    Router,
};

pub mod agents_handlers;
pub mod campaigns_handlers;
pub mod error;
pub mod health_handlers;
pub mod ml_engines_handlers;
pub mod response;
pub mod state;

pub use error::{ApiResult, AppError};
pub use state::AppState;

/// Creates the agents API router (nested under /api/agents)
pub fn create_agents_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(agents_handlers::list_agents).post(agents_handlers::create_agent),
        )
        .route("/{agent_id}", get(agents_handlers::get_agent))
}

/// Creates the campaigns API router (nested under /api/campaigns)
pub fn create_campaigns_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(campaigns_handlers::list_campaigns).post(campaigns_handlers::create_campaign),
    )
}

/// Creates the ML engines API router (nested under /api/ml-engines)
pub fn create_ml_engines_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(ml_engines_handlers::list_ml_engines).post(ml_engines_handlers::create_ml_engine),
    )
}

/// Full API surface with state applied
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handlers::health_check))
        .nest("/api/agents", create_agents_router())
        .nest("/api/campaigns", create_campaigns_router())
        .nest("/api/ml-engines", create_ml_engines_router())
        .with_state(state)
}
