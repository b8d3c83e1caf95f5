//! Weekly plan service - generation-orchestration pipeline
//!
//! Resolve week -> derive life-phase context -> build prompt -> call the
//! generator -> validate -> persist. The week-start date is resolved once
//! and passed through; no downstream component recomputes it.

use crate::config::{PlanConfig, PlausibilityPolicy};
use crate::error::ApiError;
use crate::generator::PlanGenerator;
use crate::repositories::{SaveWeeklyPlan, WeeklyPlanRecord, WeeklyPlanRepository};
use crate::services::prompt::build_prompt;
use chrono::{DateTime, NaiveDate, Utc};
use nutriplan_shared::energy::daily_calorie_target;
use nutriplan_shared::life_phase::{build_context, NutritionContext};
use nutriplan_shared::models::{GenerationRequest, UserProfile};
use nutriplan_shared::validation::{life_phase_plausibility, validate_plan, LifePhaseWarning};
use nutriplan_shared::week::resolve_week_start_utc;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

/// Everything derived from a request before the generator is called
#[derive(Debug)]
pub struct PlanInputs {
    pub week_start: NaiveDate,
    pub context: NutritionContext,
    /// Calorie target before the life-phase extra
    pub baseline_calories: u32,
    /// Calorie target handed to the generator (baseline + extra)
    pub target_calories: u32,
    pub prompt: String,
}

/// Result of a successful pipeline run
#[derive(Debug, Serialize)]
pub struct PlanOutcome {
    pub record: WeeklyPlanRecord,
    /// Soft plausibility warning, if any, attached rather than thrown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<LifePhaseWarning>,
}

/// Weekly plan service
pub struct PlanService;

impl PlanService {
    /// Derive the generation inputs for a request at a given instant.
    ///
    /// Pure except for the clock passed in; the resolved week start is the
    /// only week computation in the whole pipeline.
    pub fn plan_inputs(
        profile: &UserProfile,
        request: &GenerationRequest,
        language: &str,
        now: DateTime<Utc>,
    ) -> PlanInputs {
        let week_start = resolve_week_start_utc(now, request.week_offset);
        let context = build_context(profile);
        let baseline_calories = daily_calorie_target(profile);
        let target_calories = baseline_calories + context.extra_calories;
        let prompt = build_prompt(
            profile,
            &request.preferences,
            target_calories,
            &context,
            request.include_snacks,
            language,
        );

        PlanInputs {
            week_start,
            context,
            baseline_calories,
            target_calories,
            prompt,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// On any failure nothing is persisted; on success exactly one record
    /// exists for (user, week) and the outcome carries the soft warning if
    /// the plan fell below the life-phase calorie floor.
    pub async fn generate_weekly_plan(
        db: &PgPool,
        generator: &dyn PlanGenerator,
        policy: &PlanConfig,
        user_id: Uuid,
        profile: &UserProfile,
        request: &GenerationRequest,
    ) -> Result<PlanOutcome, ApiError> {
        let inputs = Self::plan_inputs(profile, request, &policy.language, Utc::now());

        info!(
            %user_id,
            week_start = %inputs.week_start,
            target_kcal = inputs.target_calories,
            include_snacks = request.include_snacks,
            "Generating weekly plan"
        );

        let candidate = generator.generate(&inputs.prompt).await?;

        let plan = validate_plan(&candidate, request.include_snacks).map_err(|violations| {
            warn!(%user_id, violations = violations.len(), "Generated plan rejected");
            ApiError::PlanRejected(violations)
        })?;

        let warning =
            life_phase_plausibility(&plan.week_summary, inputs.baseline_calories, &inputs.context);
        if let Some(warning) = &warning {
            match policy.plausibility {
                PlausibilityPolicy::Reject => {
                    warn!(%user_id, %warning, "Plan rejected by plausibility policy");
                    return Err(ApiError::PlanImplausible(warning.clone()));
                }
                PlausibilityPolicy::Warn => {
                    warn!(%user_id, %warning, "Plan below life-phase calorie floor");
                }
            }
        }

        // Kept verbatim alongside the plan so a rejected or regenerated
        // week can be audited and retried with the same inputs.
        let generation_inputs = serde_json::json!({
            "profile": profile,
            "request": request,
            "weekStartDate": inputs.week_start,
            "dailyCalorieTarget": inputs.target_calories,
            "nutritionContext": inputs.context,
        });

        let record = WeeklyPlanRepository::upsert(
            db,
            SaveWeeklyPlan {
                user_id,
                week_start_date: inputs.week_start,
                total_calories: plan.week_summary.total_calories,
                avg_daily_calories: plan.week_summary.avg_daily_calories,
                total_protein: plan.week_summary.total_protein,
                total_carbs: plan.week_summary.total_carbs,
                total_fat: plan.week_summary.total_fat,
                diet_type: plan.week_summary.diet_type.clone(),
                plan: serde_json::to_value(&plan)
                    .map_err(|e| ApiError::Internal(e.into()))?,
                generation_inputs,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(%user_id, week_start = %record.week_start_date, "Weekly plan stored");

        Ok(PlanOutcome { record, warning })
    }

    /// Fetch the stored plan for a user and week offset
    pub async fn get_plan(
        db: &PgPool,
        user_id: Uuid,
        week_offset: i64,
    ) -> Result<WeeklyPlanRecord, ApiError> {
        let week_start = resolve_week_start_utc(Utc::now(), week_offset);
        WeeklyPlanRepository::find_by_user_and_week(db, user_id, week_start)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("No plan stored for this week".to_string()))
    }

    /// List all stored plans for a user
    pub async fn list_plans(db: &PgPool, user_id: Uuid) -> Result<Vec<WeeklyPlanRecord>, ApiError> {
        WeeklyPlanRepository::list_for_user(db, user_id)
            .await
            .map_err(ApiError::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriplan_shared::energy::{ActivityLevel, BiologicalSex, FitnessGoal};
    use nutriplan_shared::life_phase::BreastfeedingLevel;
    use nutriplan_shared::models::PlanPreferences;

    fn profile() -> UserProfile {
        UserProfile {
            age_years: 28,
            gender: BiologicalSex::Female,
            weight_kg: 62.0,
            height_cm: 165.0,
            fitness_goal: FitnessGoal::Maintain,
            activity_level: ActivityLevel::LightlyActive,
            nationality: "Egyptian".to_string(),
            fasting_type: None,
            pregnancy_trimester: None,
            breastfeeding_level: None,
        }
    }

    fn request(week_offset: i64) -> GenerationRequest {
        GenerationRequest {
            week_offset,
            include_snacks: false,
            preferences: PlanPreferences::default(),
        }
    }

    fn march_10() -> DateTime<Utc> {
        // 2024-03-10 is a Sunday; the anchored week starts 2024-03-09
        chrono::NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn inputs_resolve_week_from_the_shared_resolver() {
        let inputs = PlanService::plan_inputs(&profile(), &request(0), "English", march_10());
        assert_eq!(
            inputs.week_start,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );

        let next = PlanService::plan_inputs(&profile(), &request(1), "English", march_10());
        assert_eq!(
            next.week_start,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()
        );
    }

    #[test]
    fn target_includes_life_phase_extra_once() {
        let baseline_inputs =
            PlanService::plan_inputs(&profile(), &request(0), "English", march_10());
        assert_eq!(
            baseline_inputs.target_calories,
            baseline_inputs.baseline_calories
        );

        let mut nursing = profile();
        nursing.breastfeeding_level = Some(BreastfeedingLevel::Exclusive);
        let nursing_inputs =
            PlanService::plan_inputs(&nursing, &request(0), "English", march_10());
        assert_eq!(
            nursing_inputs.target_calories,
            nursing_inputs.baseline_calories + 400
        );
    }

    #[test]
    fn prompt_carries_the_adjusted_target() {
        let mut nursing = profile();
        nursing.breastfeeding_level = Some(BreastfeedingLevel::Exclusive);
        let inputs = PlanService::plan_inputs(&nursing, &request(0), "English", march_10());
        assert!(inputs
            .prompt
            .contains(&format!("Daily calorie target: {} kcal", inputs.target_calories)));
    }
}
