// ABOUTME: Liveness endpoint
// ABOUTME: Reports service name and version without touching MindsDB

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mindgate",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
