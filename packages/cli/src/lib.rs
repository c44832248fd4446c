use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use mindgate_api::{create_router, AppState};
use mindgate_mindsdb::{MindsDbClient, SqlGateway};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;

pub use config::{Config, ConfigError};

#[cfg(test)]
mod tests;

/// Install the global subscriber; `RUST_LOG` overrides the default `info`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

/// Connect to MindsDB; failure here is fatal for every command
pub async fn connect_gateway(config: &Config) -> anyhow::Result<MindsDbClient> {
    MindsDbClient::connect(config.mindsdb())
        .await
        .with_context(|| format!("Failed to connect to MindsDB at {}", config.mindsdb_host))
}

/// Router with CORS and request tracing layered on
pub fn build_app(gateway: Arc<dyn SqlGateway>, config: &Config) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let state = AppState::new(gateway, &config.data_dir);
    Ok(create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let client = connect_gateway(&config).await?;
    let app = build_app(Arc::new(client), &config)?;

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Mindgate listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Connect, make sure the project exists, then exit. Unlike `serve`, a
/// failed bootstrap is an error here.
pub async fn run_setup(config: Config) -> anyhow::Result<()> {
    let client = connect_gateway(&config).await?;
    client
        .try_ensure_namespace()
        .await
        .with_context(|| {
            format!("Failed to set up MindsDB project '{}'", config.mindsdb_project)
        })?;
    info!(
        "MindsDB at {} is ready with project '{}'",
        config.mindsdb_host,
        client.namespace()
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
