//! Application error handling
//!
//! Unified error type for the pipeline and API, converting internal errors
//! to structured HTTP responses. Hard plan violations are enumerated in the
//! response body so the caller can retry with an adjusted prompt.

use crate::generator::GeneratorError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutriplan_shared::validation::{LifePhaseWarning, PlanViolation};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Generated plan rejected: {} violation(s)", .0.len())]
    PlanRejected(Vec<PlanViolation>),

    #[error("Generated plan implausible for life phase")]
    PlanImplausible(LifePhaseWarning),

    #[error("Generation call failed")]
    Generation(#[from] GeneratorError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, violations) = match &self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                Vec::new(),
            ),
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), Vec::new())
            }
            ApiError::PlanRejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PLAN_REJECTED",
                "The generated plan violates the structural contract".to_string(),
                errors.iter().map(|v| v.to_string()).collect(),
            ),
            ApiError::PlanImplausible(warning) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PLAN_IMPLAUSIBLE",
                warning.to_string(),
                Vec::new(),
            ),
            ApiError::Generation(err) => {
                error!("Generation call failed: {:?}", err);
                let status = match err {
                    GeneratorError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (
                    status,
                    "GENERATION_ERROR",
                    "The plan generator failed or timed out".to_string(),
                    Vec::new(),
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                violations,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_plan_rejected_status() {
        let error = ApiError::PlanRejected(vec![PlanViolation::WrongDayCount { found: 6 }]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_generation_timeout_status() {
        let error = ApiError::Generation(GeneratorError::Timeout);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("Plan not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
