//! Energy math
//!
//! Pure calorie-target calculations based on the Mifflin-St Jeor equation.
//! The daily target feeds the generation prompt; life-phase adjustments are
//! applied on top by the caller (see [`crate::life_phase`]).

use serde::{Deserialize, Serialize};

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    /// Activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

/// Fitness goal driving the calorie adjustment over maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    #[default]
    Maintain,
    GainMuscle,
}

impl FitnessGoal {
    /// Daily calorie delta relative to TDEE
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            FitnessGoal::LoseWeight => -500.0,
            FitnessGoal::Maintain => 0.0,
            FitnessGoal::GainMuscle => 300.0,
        }
    }
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Total Daily Energy Expenditure: BMR scaled by activity
pub fn calculate_tdee(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: BiologicalSex,
    activity: ActivityLevel,
) -> f64 {
    calculate_bmr(weight_kg, height_cm, age_years, sex) * activity.multiplier()
}

/// Baseline daily calorie target for a profile: TDEE adjusted for the
/// fitness goal, rounded to a whole kcal. Life-phase extras are not
/// included here.
pub fn daily_calorie_target(profile: &crate::models::UserProfile) -> u32 {
    let tdee = calculate_tdee(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.gender,
        profile.activity_level,
    );
    let target = tdee + profile.fitness_goal.calorie_adjustment();
    // A generated plan below 1200 kcal/day is never a sane target
    target.max(1200.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    #[test]
    fn bmr_male_formula() {
        // 80kg, 180cm, 30y male: 10*80 + 6.25*180 - 5*30 + 5 = 1780
        let bmr = calculate_bmr(80.0, 180.0, 30, BiologicalSex::Male);
        assert!((bmr - 1780.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bmr_female_formula() {
        // 60kg, 165cm, 28y female: 10*60 + 6.25*165 - 5*28 - 161 = 1330.25
        let bmr = calculate_bmr(60.0, 165.0, 28, BiologicalSex::Female);
        assert!((bmr - 1330.25).abs() < f64::EPSILON);
    }

    #[test]
    fn tdee_scales_with_activity() {
        let sedentary = calculate_tdee(80.0, 180.0, 30, BiologicalSex::Male, ActivityLevel::Sedentary);
        let very_active =
            calculate_tdee(80.0, 180.0, 30, BiologicalSex::Male, ActivityLevel::VeryActive);
        assert!(very_active > sedentary);
    }

    #[test]
    fn target_applies_goal_adjustment() {
        let mut profile = UserProfile::example_male();
        profile.fitness_goal = FitnessGoal::Maintain;
        let maintain = daily_calorie_target(&profile);
        profile.fitness_goal = FitnessGoal::LoseWeight;
        let lose = daily_calorie_target(&profile);
        assert_eq!(maintain - lose, 500);
    }

    #[test]
    fn target_never_drops_below_floor() {
        let profile = UserProfile {
            age_years: 80,
            weight_kg: 40.0,
            height_cm: 150.0,
            gender: BiologicalSex::Female,
            activity_level: ActivityLevel::Sedentary,
            fitness_goal: FitnessGoal::LoseWeight,
            ..UserProfile::example_female()
        };
        assert_eq!(daily_calorie_target(&profile), 1200);
    }
}
