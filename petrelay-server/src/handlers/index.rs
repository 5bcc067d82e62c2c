use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{infra::app_state::AppState, routes::ENDPOINTS};

/// Service banner listing the available endpoints.
pub async fn root_handler() -> Json<Value> {
    let endpoints: serde_json::Map<String, Value> = ENDPOINTS
        .iter()
        .map(|endpoint| {
            (
                endpoint.name.to_string(),
                json!(format!("{} {}", endpoint.method, endpoint.path)),
            )
        })
        .collect();

    Json(json!({
        "success": true,
        "message": "Pet Relay API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
    }))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "findings": state.findings().len(),
    }))
}
