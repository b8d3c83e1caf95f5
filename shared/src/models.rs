//! Domain models
//!
//! The user profile and preferences are read-only inputs owned by the
//! profile subsystem; the generated-plan types mirror the JSON contract the
//! generator is instructed to produce. Candidate plans only become a typed
//! [`GeneratedPlan`] after validation (see [`crate::validation`]).

use crate::energy::{ActivityLevel, BiologicalSex, FitnessGoal};
use crate::life_phase::{BreastfeedingLevel, FastingType};
use serde::{Deserialize, Serialize};

/// Physiological profile of the user requesting a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age_years: i32,
    pub gender: BiologicalSex,
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub fitness_goal: FitnessGoal,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Nationality / cuisine preference, free-form
    pub nationality: String,
    #[serde(default)]
    pub fasting_type: Option<FastingType>,
    /// 1-3 when pregnant, absent otherwise
    #[serde(default)]
    pub pregnancy_trimester: Option<u8>,
    #[serde(default)]
    pub breastfeeding_level: Option<BreastfeedingLevel>,
}

/// Free-form meal preferences supplied with a generation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPreferences {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub max_prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub excluded_ingredients: Vec<String>,
}

/// A request to generate a weekly plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// 0 = current week, signed
    #[serde(default)]
    pub week_offset: i64,
    #[serde(default)]
    pub include_snacks: bool,
    #[serde(default)]
    pub preferences: PlanPreferences,
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack1,
    Snack2,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack1 => "snack1",
            MealType::Snack2 => "snack2",
        }
    }
}

/// Meal-type set a conformant day must cover
pub fn required_meal_types(include_snacks: bool) -> &'static [MealType] {
    if include_snacks {
        &[
            MealType::Breakfast,
            MealType::Snack1,
            MealType::Lunch,
            MealType::Snack2,
            MealType::Dinner,
        ]
    } else {
        &[MealType::Breakfast, MealType::Lunch, MealType::Dinner]
    }
}

/// Meals per day under the structural contract
pub fn meals_per_day(include_snacks: bool) -> usize {
    required_meal_types(include_snacks).len()
}

/// Single ingredient of a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free-form amount, e.g. "200" or "1/2"
    pub quantity: String,
    pub unit: String,
}

/// A single meal of a day plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(rename = "prepTime", default)]
    pub prep_time_minutes: u32,
    #[serde(rename = "cookTime", default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub servings: u32,
}

/// One of the seven days of a generated plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-7
    pub day_number: u8,
    pub day_name: String,
    pub total_calories: f64,
    pub meals: Vec<Meal>,
}

/// Aggregate totals over the whole week
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub total_calories: f64,
    pub avg_daily_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    #[serde(default)]
    pub diet_type: String,
}

/// A fully validated seven-day plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub week_summary: WeekSummary,
    pub days: Vec<DayPlan>,
}

#[cfg(test)]
impl UserProfile {
    pub(crate) fn example_male() -> Self {
        Self {
            age_years: 30,
            gender: BiologicalSex::Male,
            weight_kg: 80.0,
            height_cm: 180.0,
            fitness_goal: FitnessGoal::Maintain,
            activity_level: ActivityLevel::ModeratelyActive,
            nationality: "Jordanian".to_string(),
            fasting_type: None,
            pregnancy_trimester: None,
            breastfeeding_level: None,
        }
    }

    pub(crate) fn example_female() -> Self {
        Self {
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
}
