//! Health check endpoints

use crate::db;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - basic health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/live - process liveness
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready - readiness including database connectivity
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match db::health_check(state.db()).await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
