use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use petrelay_core::{Finding, FindingStats, SubmitFinding};
use serde::Serialize;
use tracing::{debug, warn};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub finding_count: usize,
}

#[derive(Debug, Serialize)]
pub struct PetsResponse {
    pub success: bool,
    pub pets: Vec<Finding>,
    pub count: usize,
    /// Unix milliseconds at which the listing was taken.
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: FindingStats,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

/// Record a finding from a scanner
///
/// # Request
///
/// ```json
/// {
///   "jobId": "2f0c…",
///   "placeId": "1094…",
///   "pets": ["Cat", "Dog"],
///   "rates": { "Cat": 5 }
/// }
/// ```
///
/// # Response
///
/// - `200 OK` with the store size after the write
/// - `400 Bad Request` if the body is malformed or a required field is
///   missing or empty; nothing is stored
///
/// A finding for an already-known `(jobId, placeId)` replaces the old one.
pub async fn submit_finding_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubmitFinding>, JsonRejection>,
) -> AppResult<Json<SubmitResponse>> {
    let Json(submission) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "rejected malformed submission");
        AppError::from(rejection)
    })?;

    let outcome = state.findings().submit(submission).map_err(|err| {
        warn!(error = %err, "rejected invalid submission");
        AppError::from(err)
    })?;

    debug!(
        job_id = %outcome.key.job_id,
        place_id = %outcome.key.place_id,
        count = outcome.count,
        "submission accepted"
    );

    let message = if outcome.replaced {
        "Finding updated"
    } else {
        "Finding submitted"
    };

    Ok(Json(SubmitResponse {
        success: true,
        message: message.to_string(),
        finding_count: outcome.count,
    }))
}

/// List live findings, newest first
///
/// Expired and over-capacity findings are compacted away before the listing
/// is taken.
pub async fn list_pets_handler(
    State(state): State<AppState>,
) -> AppResult<Json<PetsResponse>> {
    let snapshot = state.findings().list();

    Ok(Json(PetsResponse {
        success: true,
        count: snapshot.count,
        pets: snapshot.findings,
        timestamp: snapshot.timestamp.timestamp_millis(),
    }))
}

/// Aggregate statistics over live findings
pub async fn stats_handler(
    State(state): State<AppState>,
) -> AppResult<Json<StatsResponse>> {
    Ok(Json(StatsResponse {
        success: true,
        stats: state.findings().stats(),
    }))
}

/// Drop every stored finding
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.findings().clear();

    Json(ClearResponse {
        success: true,
        message: format!("Cleared {removed} findings"),
    })
}
