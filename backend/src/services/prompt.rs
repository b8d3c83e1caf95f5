//! Prompt construction for the plan generator
//!
//! Builds the single instruction document sent to the generative model:
//! the hard structural contract first, then the client profile and calorie
//! target, then natural-language riders for each active life-phase flag in
//! fixed order (fasting, pregnancy, breastfeeding, hydration). Pure string
//! construction; the generation call itself lives in [`crate::generator`].

use nutriplan_shared::life_phase::{BreastfeedingLevel, NutritionContext};
use nutriplan_shared::models::{required_meal_types, PlanPreferences, UserProfile};
use serde::Serialize;
use std::fmt::Write;

/// Build the generation prompt.
///
/// `daily_calorie_target` must already include any life-phase extra; the
/// riders tell the model the adjustment is accounted for so it is not
/// applied twice.
pub fn build_prompt(
    profile: &UserProfile,
    preferences: &PlanPreferences,
    daily_calorie_target: u32,
    context: &NutritionContext,
    include_snacks: bool,
    language: &str,
) -> String {
    let meal_types: Vec<&str> = required_meal_types(include_snacks)
        .iter()
        .map(|t| t.as_str())
        .collect();
    let meals_per_day = meal_types.len();

    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "You are a professional nutritionist. Create a personalized 7-day meal plan.\n\n",
    );

    // Client profile and numeric target
    prompt.push_str("## Client\n");
    let _ = writeln!(prompt, "- Age: {} years, Sex: {}", profile.age_years, enum_label(&profile.gender));
    let _ = writeln!(prompt, "- Weight: {} kg, Height: {} cm", profile.weight_kg, profile.height_cm);
    let _ = writeln!(prompt, "- Fitness goal: {}", enum_label(&profile.fitness_goal));
    let _ = writeln!(prompt, "- Activity level: {}", enum_label(&profile.activity_level));
    let cuisine = preferences.cuisine.as_deref().unwrap_or(&profile.nationality);
    let _ = writeln!(prompt, "- Preferred cuisine: {cuisine}");
    let _ = writeln!(prompt, "- Daily calorie target: {daily_calorie_target} kcal");
    if let Some(minutes) = preferences.max_prep_time_minutes {
        let _ = writeln!(prompt, "- Maximum preparation time per meal: {minutes} minutes");
    }
    if !preferences.excluded_ingredients.is_empty() {
        let _ = writeln!(
            prompt,
            "- Never use these ingredients: {}",
            preferences.excluded_ingredients.join(", ")
        );
    }

    // Hard structural contract
    prompt.push_str("\n## Response contract\n");
    prompt.push_str(
        "Respond with a single valid JSON document and nothing else - no prose, no Markdown fences.\n",
    );
    prompt.push_str(
        "- \"weekSummary\": object with \"totalCalories\", \"avgDailyCalories\", \"totalProtein\", \"totalCarbs\", \"totalFat\" (all numbers strictly greater than 0) and \"dietType\".\n",
    );
    prompt.push_str(
        "- \"days\": exactly 7 entries; each with \"dayNumber\" (1-7), \"dayName\", \"totalCalories\" and \"meals\".\n",
    );
    let _ = writeln!(
        prompt,
        "- Each day has exactly {meals_per_day} meals whose \"type\" values cover exactly: {}.",
        meal_types.join(", ")
    );
    prompt.push_str(
        "- Every meal: \"type\", \"name\", \"calories\" (greater than 0), \"protein\", \"carbs\", \"fat\", \
         \"ingredients\" (non-empty array of {\"name\", \"quantity\", \"unit\"}, quantity as a string), \
         \"instructions\" (non-empty array of steps), \"prepTime\" and \"cookTime\" in whole minutes, \"servings\".\n",
    );
    let _ = writeln!(prompt, "Write all names and instructions in {language}.");

    // Life-phase riders, fixed order: fasting, pregnancy, breastfeeding, hydration
    let mut riders = Vec::new();
    if context.is_fasting_period {
        riders.push(
            "This plan is for the Ramadan fasting period: name the pre-dawn meal (type \"breakfast\") \
             Suhoor and the sunset meal (type \"dinner\") Iftar. Favor slow-digesting, hydrating foods \
             at Suhoor; start Iftar with dates and water."
                .to_string(),
        );
    }
    if let Some(trimester) = context.pregnancy_trimester {
        riders.push(format!(
            "The client is in pregnancy trimester {trimester}. The calorie target already includes the \
             trimester adjustment; emphasize folate, iron, calcium and omega-3 rich foods and avoid \
             unpasteurized dairy, raw fish and high-mercury seafood."
        ));
    }
    if let Some(level) = context.breastfeeding_level {
        let level = match level {
            BreastfeedingLevel::Exclusive => "exclusively",
            BreastfeedingLevel::Partial => "partially",
        };
        riders.push(format!(
            "The client is {level} breastfeeding. The calorie target already includes the breastfeeding \
             adjustment; emphasize nutrient-dense foods and frequent fluids."
        ));
    }
    if context.needs_hydration_reminders {
        riders.push(
            "Include reminders to drink water throughout the day in the meal instructions.".to_string(),
        );
    }

    if !riders.is_empty() {
        prompt.push_str("\n## Additional guidance\n");
        for rider in riders {
            let _ = writeln!(prompt, "- {rider}");
        }
    }

    prompt
}

/// Render a serde-serialized unit enum as its wire label
fn enum_label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "unknown".to_string(),
    }
}
