use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, handlers::findings};

/// Routes nested under `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(findings::submit_finding_handler))
        .route("/pets", get(findings::list_pets_handler))
        .route("/stats", get(findings::stats_handler))
        .route("/clear", post(findings::clear_handler))
}
