//! Plan structural validation
//!
//! The generator's output is untrusted JSON. It enters this module as a
//! plain [`serde_json::Value`] and only leaves as a typed
//! [`GeneratedPlan`] once every hard check has passed, so partially trusted
//! data can never reach persistence. All distinct violations are collected
//! for diagnostics rather than stopping at the first.

use crate::life_phase::NutritionContext;
use crate::models::{meals_per_day, required_meal_types, GeneratedPlan, WeekSummary};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Week-summary fields that must be present and strictly positive
pub const SUMMARY_NUMERIC_FIELDS: [&str; 5] = [
    "totalCalories",
    "avgDailyCalories",
    "totalProtein",
    "totalCarbs",
    "totalFat",
];

/// A single hard-contract violation. Any violation rejects the plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanViolation {
    #[error("candidate is not a JSON object")]
    NotAnObject,

    #[error("missing top-level field `{0}`")]
    MissingTopLevel(&'static str),

    #[error("`days` is not an array")]
    DaysNotAnArray,

    #[error("expected exactly 7 days, found {found}")]
    WrongDayCount { found: usize },

    #[error("day {day}: not a JSON object")]
    DayNotAnObject { day: usize },

    #[error("day {day}: `meals` is missing or not an array")]
    MealsNotAnArray { day: usize },

    #[error("day {day}: expected exactly {expected} meals, found {found}")]
    WrongMealCount {
        day: usize,
        expected: usize,
        found: usize,
    },

    #[error("day {day}: missing required meal type `{meal_type}`")]
    MissingMealType { day: usize, meal_type: &'static str },

    #[error("day {day}, meal {meal}: {message}")]
    MealField {
        day: usize,
        meal: usize,
        message: String,
    },

    #[error("`weekSummary` is not a JSON object")]
    SummaryNotAnObject,

    #[error("week summary field `{field}` is missing or not strictly positive")]
    SummaryFieldNotPositive { field: &'static str },

    #[error("plan does not match the typed contract: {0}")]
    Shape(String),
}

/// Validate an untrusted candidate plan against the structural contract.
///
/// Checks run in contract order: top-level shape, day count, per-day meal
/// count, per-day required meal-type set (order-independent), per-meal
/// fields, week-summary numerics. On success the candidate is deserialized
/// into the typed plan; on failure every collected violation is returned.
pub fn validate_plan(
    candidate: &Value,
    include_snacks: bool,
) -> Result<GeneratedPlan, Vec<PlanViolation>> {
    let mut violations = Vec::new();

    let Some(obj) = candidate.as_object() else {
        return Err(vec![PlanViolation::NotAnObject]);
    };

    let summary = obj.get("weekSummary");
    if summary.is_none() {
        violations.push(PlanViolation::MissingTopLevel("weekSummary"));
    }

    match obj.get("days") {
        None => violations.push(PlanViolation::MissingTopLevel("days")),
        Some(days) => match days.as_array() {
            None => violations.push(PlanViolation::DaysNotAnArray),
            Some(days) => {
                if days.len() != 7 {
                    violations.push(PlanViolation::WrongDayCount { found: days.len() });
                }
                for (idx, day) in days.iter().enumerate() {
                    check_day(idx + 1, day, include_snacks, &mut violations);
                }
            }
        },
    }

    if let Some(summary) = summary {
        check_week_summary(summary, &mut violations);
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    // Every hard check passed; the typed conversion should only fail on
    // fields the checks above do not cover (e.g. non-numeric macros).
    serde_json::from_value::<GeneratedPlan>(candidate.clone())
        .map_err(|err| vec![PlanViolation::Shape(err.to_string())])
}

fn check_day(day: usize, value: &Value, include_snacks: bool, violations: &mut Vec<PlanViolation>) {
    let Some(obj) = value.as_object() else {
        violations.push(PlanViolation::DayNotAnObject { day });
        return;
    };

    let Some(meals) = obj.get("meals").and_then(Value::as_array) else {
        violations.push(PlanViolation::MealsNotAnArray { day });
        return;
    };

    let expected = meals_per_day(include_snacks);
    if meals.len() != expected {
        violations.push(PlanViolation::WrongMealCount {
            day,
            expected,
            found: meals.len(),
        });
    }

    let present: Vec<&str> = meals
        .iter()
        .filter_map(|meal| meal.get("type").and_then(Value::as_str))
        .collect();
    for required in required_meal_types(include_snacks) {
        if !present.iter().any(|t| *t == required.as_str()) {
            violations.push(PlanViolation::MissingMealType {
                day,
                meal_type: required.as_str(),
            });
        }
    }

    for (idx, meal) in meals.iter().enumerate() {
        check_meal(day, idx + 1, meal, violations);
    }
}

fn check_meal(day: usize, meal: usize, value: &Value, violations: &mut Vec<PlanViolation>) {
    let mut fail = |message: String| {
        violations.push(PlanViolation::MealField { day, meal, message });
    };

    let Some(obj) = value.as_object() else {
        fail("not a JSON object".to_string());
        return;
    };

    if !is_non_empty_string(obj.get("name")) {
        fail("`name` must be a non-empty string".to_string());
    }
    if !is_non_empty_string(obj.get("type")) {
        fail("`type` must be a non-empty string".to_string());
    }

    match obj.get("calories").and_then(Value::as_f64) {
        Some(calories) if calories > 0.0 => {}
        _ => fail("`calories` must be a number greater than 0".to_string()),
    }

    match obj.get("ingredients").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => {
            for (index, ingredient) in list.iter().enumerate() {
                for field in ["name", "quantity", "unit"] {
                    if !is_non_empty_string(ingredient.get(field)) {
                        fail(format!(
                            "ingredient {}: `{field}` must be a non-empty string",
                            index + 1
                        ));
                    }
                }
            }
        }
        _ => fail("`ingredients` must be a non-empty array".to_string()),
    }

    match obj.get("instructions").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => {}
        _ => fail("`instructions` must be a non-empty array".to_string()),
    }
}

fn check_week_summary(summary: &Value, violations: &mut Vec<PlanViolation>) {
    let Some(obj) = summary.as_object() else {
        violations.push(PlanViolation::SummaryNotAnObject);
        return;
    };

    for field in SUMMARY_NUMERIC_FIELDS {
        match obj.get(field).and_then(Value::as_f64) {
            Some(value) if value > 0.0 => {}
            _ => violations.push(PlanViolation::SummaryFieldNotPositive { field }),
        }
    }
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// Soft life-phase plausibility warning. Non-fatal: carried alongside an
/// otherwise-accepted plan so the caller can decide what to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("average daily calories {avg_daily_calories:.0} fall below the life-phase floor {required_floor:.0}")]
pub struct LifePhaseWarning {
    pub avg_daily_calories: f64,
    pub required_floor: f64,
}

/// Compare the generated weekly average against the life-phase calorie
/// floor (`baseline + extra`). Returns a warning when the average falls
/// below the floor, `None` otherwise.
pub fn life_phase_plausibility(
    summary: &WeekSummary,
    baseline_calories: u32,
    context: &NutritionContext,
) -> Option<LifePhaseWarning> {
    let required_floor = f64::from(baseline_calories + context.extra_calories);
    if summary.avg_daily_calories < required_floor {
        Some(LifePhaseWarning {
            avg_daily_calories: summary.avg_daily_calories,
            required_floor,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life_phase::build_context;
    use crate::models::{MealType, UserProfile};
    use serde_json::json;

    fn meal_json(meal_type: MealType) -> Value {
        json!({
            "type": meal_type.as_str(),
            "name": format!("Sample {}", meal_type.as_str()),
            "calories": 450,
            "protein": 30,
            "carbs": 40,
            "fat": 15,
            "ingredients": [
                {"name": "chicken breast", "quantity": "200", "unit": "g"},
                {"name": "olive oil", "quantity": "1", "unit": "tbsp"}
            ],
            "instructions": ["Season the chicken.", "Cook until done."],
            "prepTime": 10,
            "cookTime": 20,
            "servings": 1
        })
    }

    fn day_json(day_number: u8, include_snacks: bool) -> Value {
        let meals: Vec<Value> = required_meal_types(include_snacks)
            .iter()
            .map(|t| meal_json(*t))
            .collect();
        json!({
            "dayNumber": day_number,
            "dayName": format!("Day {day_number}"),
            "totalCalories": 2250,
            "meals": meals
        })
    }

    fn plan_json(include_snacks: bool) -> Value {
        let days: Vec<Value> = (1..=7).map(|n| day_json(n, include_snacks)).collect();
        json!({
            "weekSummary": {
                "totalCalories": 15750,
                "avgDailyCalories": 2250,
                "totalProtein": 1050,
                "totalCarbs": 1400,
                "totalFat": 525,
                "dietType": "balanced"
            },
            "days": days
        })
    }

    #[test]
    fn accepts_conformant_plan_with_snacks() {
        let plan = validate_plan(&plan_json(true), true).expect("plan should validate");
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[0].meals.len(), 5);
        assert_eq!(plan.week_summary.avg_daily_calories, 2250.0);
    }

    #[test]
    fn accepts_conformant_plan_without_snacks() {
        let plan = validate_plan(&plan_json(false), false).expect("plan should validate");
        assert_eq!(plan.days[3].meals.len(), 3);
    }

    #[test]
    fn rejects_non_object_candidate() {
        let errs = validate_plan(&json!([1, 2, 3]), false).unwrap_err();
        assert_eq!(errs, vec![PlanViolation::NotAnObject]);
    }

    #[test]
    fn rejects_six_day_plan() {
        let mut candidate = plan_json(false);
        candidate["days"].as_array_mut().unwrap().pop();
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.contains(&PlanViolation::WrongDayCount { found: 6 }));
    }

    #[test]
    fn rejects_three_meals_when_snacks_expected() {
        let mut candidate = plan_json(true);
        candidate["days"][2]["meals"] = json!([
            meal_json(MealType::Breakfast),
            meal_json(MealType::Lunch),
            meal_json(MealType::Dinner),
        ]);
        let errs = validate_plan(&candidate, true).unwrap_err();
        assert!(errs.contains(&PlanViolation::WrongMealCount {
            day: 3,
            expected: 5,
            found: 3
        }));
    }

    #[test]
    fn missing_snack2_on_day_four_names_day_and_type() {
        let mut candidate = plan_json(true);
        // Replace day 4's snack2 with a duplicate snack1
        candidate["days"][3]["meals"][3] = meal_json(MealType::Snack1);
        let errs = validate_plan(&candidate, true).unwrap_err();
        assert!(errs.contains(&PlanViolation::MissingMealType {
            day: 4,
            meal_type: "snack2"
        }));
    }

    #[test]
    fn rejects_zero_calorie_meal() {
        let mut candidate = plan_json(false);
        candidate["days"][0]["meals"][0]["calories"] = json!(0);
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.iter().any(|v| matches!(
            v,
            PlanViolation::MealField { day: 1, meal: 1, message } if message.contains("calories")
        )));
    }

    #[test]
    fn rejects_empty_ingredients() {
        let mut candidate = plan_json(false);
        candidate["days"][0]["meals"][1]["ingredients"] = json!([]);
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.iter().any(|v| matches!(
            v,
            PlanViolation::MealField { day: 1, meal: 2, message } if message.contains("ingredients")
        )));
    }

    #[test]
    fn rejects_blank_ingredient_unit() {
        let mut candidate = plan_json(false);
        candidate["days"][6]["meals"][0]["ingredients"][0]["unit"] = json!("  ");
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.iter().any(|v| matches!(
            v,
            PlanViolation::MealField { day: 7, message, .. } if message.contains("unit")
        )));
    }

    #[test]
    fn rejects_empty_instructions() {
        let mut candidate = plan_json(false);
        candidate["days"][1]["meals"][2]["instructions"] = json!([]);
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.iter().any(|v| matches!(
            v,
            PlanViolation::MealField { day: 2, meal: 3, message } if message.contains("instructions")
        )));
    }

    #[test]
    fn rejects_non_positive_summary_fields() {
        let mut candidate = plan_json(false);
        candidate["weekSummary"]["totalProtein"] = json!(0);
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.contains(&PlanViolation::SummaryFieldNotPositive {
            field: "totalProtein"
        }));
    }

    #[test]
    fn rejects_missing_summary() {
        let mut candidate = plan_json(false);
        candidate.as_object_mut().unwrap().remove("weekSummary");
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.contains(&PlanViolation::MissingTopLevel("weekSummary")));
    }

    #[test]
    fn collects_multiple_violations() {
        let mut candidate = plan_json(false);
        candidate["days"].as_array_mut().unwrap().pop();
        candidate["weekSummary"]["totalFat"] = json!(-2);
        candidate["days"][0]["meals"][0]["name"] = json!("");
        let errs = validate_plan(&candidate, false).unwrap_err();
        assert!(errs.len() >= 3, "expected several violations, got {errs:?}");
    }

    #[test]
    fn plausibility_warns_below_life_phase_floor() {
        let plan = validate_plan(&plan_json(false), false).unwrap();
        let profile = UserProfile {
            pregnancy_trimester: Some(3),
            ..UserProfile::example_female()
        };
        let ctx = build_context(&profile);
        // floor = 2000 + 450 > 2250 average
        let warning = life_phase_plausibility(&plan.week_summary, 2000, &ctx)
            .expect("average below floor should warn");
        assert_eq!(warning.required_floor, 2450.0);
        assert_eq!(warning.avg_daily_calories, 2250.0);
    }

    #[test]
    fn plausibility_passes_at_or_above_floor() {
        let plan = validate_plan(&plan_json(false), false).unwrap();
        let ctx = build_context(&UserProfile::example_female());
        assert!(life_phase_plausibility(&plan.week_summary, 2250, &ctx).is_none());
        assert!(life_phase_plausibility(&plan.week_summary, 1800, &ctx).is_none());
    }
}
