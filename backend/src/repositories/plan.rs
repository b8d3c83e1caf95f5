//! Weekly plan repository - persistence for generated plans
//!
//! Exactly one record may exist per (user, week start) pair. The unique
//! constraint on that pair plus a single atomic upsert replaces the old
//! delete-then-insert sequence: a concurrent regeneration degenerates to a
//! deterministic last-writer-wins replace instead of a duplicate or a lost
//! record.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Persisted weekly plan, keyed by (user_id, week_start_date)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WeeklyPlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Canonical week key (always the anchored week-start date)
    pub week_start_date: NaiveDate,
    pub total_calories: f64,
    pub avg_daily_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub diet_type: String,
    /// The validated plan document
    pub plan: Value,
    /// Serialized copy of the generation inputs, kept for auditability
    pub generation_inputs: Value,
    pub created_at: DateTime<Utc>,
}

/// Input for saving a validated plan
#[derive(Debug, Clone)]
pub struct SaveWeeklyPlan {
    pub user_id: Uuid,
    pub week_start_date: NaiveDate,
    pub total_calories: f64,
    pub avg_daily_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub diet_type: String,
    pub plan: Value,
    pub generation_inputs: Value,
}

/// Weekly plan repository
pub struct WeeklyPlanRepository;

impl WeeklyPlanRepository {
    /// Insert or replace the plan for (user, week) in a single statement.
    ///
    /// After this returns, exactly one record exists for the key and it
    /// holds the given content.
    pub async fn upsert(db: &PgPool, input: SaveWeeklyPlan) -> Result<WeeklyPlanRecord> {
        let record = sqlx::query_as::<_, WeeklyPlanRecord>(
            r#"
            INSERT INTO weekly_plans (
                id, user_id, week_start_date, total_calories, avg_daily_calories,
                total_protein, total_carbs, total_fat, diet_type, plan,
                generation_inputs, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            ON CONFLICT (user_id, week_start_date) DO UPDATE SET
                total_calories = EXCLUDED.total_calories,
                avg_daily_calories = EXCLUDED.avg_daily_calories,
                total_protein = EXCLUDED.total_protein,
                total_carbs = EXCLUDED.total_carbs,
                total_fat = EXCLUDED.total_fat,
                diet_type = EXCLUDED.diet_type,
                plan = EXCLUDED.plan,
                generation_inputs = EXCLUDED.generation_inputs,
                created_at = NOW()
            RETURNING id, user_id, week_start_date, total_calories, avg_daily_calories,
                      total_protein, total_carbs, total_fat, diet_type, plan,
                      generation_inputs, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.user_id)
        .bind(input.week_start_date)
        .bind(input.total_calories)
        .bind(input.avg_daily_calories)
        .bind(input.total_protein)
        .bind(input.total_carbs)
        .bind(input.total_fat)
        .bind(&input.diet_type)
        .bind(&input.plan)
        .bind(&input.generation_inputs)
        .fetch_one(db)
        .await?;

        Ok(record)
    }

    /// Find the plan for a user and an exact week-start date
    pub async fn find_by_user_and_week(
        db: &PgPool,
        user_id: Uuid,
        week_start_date: NaiveDate,
    ) -> Result<Option<WeeklyPlanRecord>> {
        let record = sqlx::query_as::<_, WeeklyPlanRecord>(
            r#"
            SELECT id, user_id, week_start_date, total_calories, avg_daily_calories,
                   total_protein, total_carbs, total_fat, diet_type, plan,
                   generation_inputs, created_at
            FROM weekly_plans
            WHERE user_id = $1 AND week_start_date = $2
            "#,
        )
        .bind(user_id)
        .bind(week_start_date)
        .fetch_optional(db)
        .await?;

        Ok(record)
    }

    /// List all stored plans for a user, newest week first
    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<WeeklyPlanRecord>> {
        let records = sqlx::query_as::<_, WeeklyPlanRecord>(
            r#"
            SELECT id, user_id, week_start_date, total_calories, avg_daily_calories,
                   total_protein, total_carbs, total_fat, diet_type, plan,
                   generation_inputs, created_at
            FROM weekly_plans
            WHERE user_id = $1
            ORDER BY week_start_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(records)
    }
}
