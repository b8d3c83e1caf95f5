//! Weekly plan API routes
//!
//! Authentication is owned by an external collaborator; these handlers take
//! the user identity as supplied by the caller.

use crate::error::ApiError;
use crate::services::{PlanOutcome, PlanService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use nutriplan_shared::models::{GenerationRequest, UserProfile};
use nutriplan_shared::week::MAX_WEEK_OFFSET;
use serde::Deserialize;
use uuid::Uuid;

/// Create plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_plan))
        .route("/:user_id", get(get_current_plan))
        .route("/:user_id/history", get(list_plans))
}

/// Request body for plan generation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub user_id: Uuid,
    pub profile: UserProfile,
    #[serde(flatten)]
    pub request: GenerationRequest,
}

/// Week selection for plan reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    #[serde(default)]
    pub week_offset: i64,
}

/// Reject week offsets outside the resolver's supported range. The offset
/// arrives as a raw i64 from the request; an unchecked extreme would
/// overflow the week arithmetic.
fn check_week_offset(week_offset: i64) -> Result<(), ApiError> {
    if !(-MAX_WEEK_OFFSET..=MAX_WEEK_OFFSET).contains(&week_offset) {
        return Err(ApiError::Validation(format!(
            "weekOffset must be between {} and {}",
            -MAX_WEEK_OFFSET, MAX_WEEK_OFFSET
        )));
    }
    Ok(())
}

/// POST /api/v1/plans/generate - run the generation pipeline
async fn generate_plan(
    State(state): State<AppState>,
    Json(body): Json<GeneratePlanRequest>,
) -> Result<Json<PlanOutcome>, ApiError> {
    if let Some(trimester) = body.profile.pregnancy_trimester {
        if !(1..=3).contains(&trimester) {
            return Err(ApiError::Validation(
                "pregnancyTrimester must be between 1 and 3".to_string(),
            ));
        }
    }
    check_week_offset(body.request.week_offset)?;

    let outcome = PlanService::generate_weekly_plan(
        state.db(),
        state.generator(),
        &state.config().plan,
        body.user_id,
        &body.profile,
        &body.request,
    )
    .await?;

    Ok(Json(outcome))
}

/// GET /api/v1/plans/:user_id?weekOffset=0 - fetch the stored plan for a week
async fn get_current_plan(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<crate::repositories::WeeklyPlanRecord>, ApiError> {
    check_week_offset(query.week_offset)?;
    let record = PlanService::get_plan(state.db(), user_id, query.week_offset).await?;
    Ok(Json(record))
}

/// GET /api/v1/plans/:user_id/history - all stored plans, newest week first
async fn list_plans(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<crate::repositories::WeeklyPlanRecord>>, ApiError> {
    let records = PlanService::list_plans(state.db(), user_id).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(-52)]
    #[case(MAX_WEEK_OFFSET)]
    #[case(-MAX_WEEK_OFFSET)]
    fn accepts_offsets_within_range(#[case] week_offset: i64) {
        assert!(check_week_offset(week_offset).is_ok());
    }

    #[rstest]
    #[case(MAX_WEEK_OFFSET + 1)]
    #[case(-MAX_WEEK_OFFSET - 1)]
    #[case(i64::MAX)]
    #[case(i64::MIN)]
    fn rejects_offsets_out_of_range(#[case] week_offset: i64) {
        let err = check_week_offset(week_offset).unwrap_err();
        assert!(matches!(err, ApiError::Validation(msg) if msg.contains("weekOffset")));
    }
}
