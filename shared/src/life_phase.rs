//! Life-phase nutrition context
//!
//! Derives the per-request [`NutritionContext`] from a user profile. The
//! context is ephemeral: it is recomputed for every generation request and
//! never persisted on its own.

use crate::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Extra daily kcal for pregnancy, second trimester
pub const PREGNANCY_TRIMESTER_2_EXTRA_KCAL: u32 = 340;
/// Extra daily kcal for pregnancy, third trimester
pub const PREGNANCY_TRIMESTER_3_EXTRA_KCAL: u32 = 450;
/// Extra daily kcal for exclusive breastfeeding
pub const BREASTFEEDING_EXCLUSIVE_EXTRA_KCAL: u32 = 400;
/// Extra daily kcal for partial breastfeeding
pub const BREASTFEEDING_PARTIAL_EXTRA_KCAL: u32 = 250;

/// Recognized religious fasting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FastingType {
    Ramadan,
}

/// Breastfeeding intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreastfeedingLevel {
    Exclusive,
    Partial,
}

/// Derived nutrition adjustments for the user's current life phase
///
/// `extra_calories` is the single applicable adjustment, never a sum: at
/// most one rule fires, and pregnancy takes precedence over breastfeeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionContext {
    pub extra_calories: u32,
    pub needs_hydration_reminders: bool,
    pub is_fasting_period: bool,
    pub fasting_type: Option<FastingType>,
    pub pregnancy_trimester: Option<u8>,
    pub breastfeeding_level: Option<BreastfeedingLevel>,
}

/// Build the nutrition context for a profile.
///
/// First match wins: trimester 2 → +340, trimester 3 → +450, else
/// exclusive breastfeeding → +400, else partial → +250, else 0. Absent
/// fields yield the zero/false defaults; there are no error conditions.
pub fn build_context(profile: &UserProfile) -> NutritionContext {
    let extra_calories = match profile.pregnancy_trimester {
        Some(2) => PREGNANCY_TRIMESTER_2_EXTRA_KCAL,
        Some(3) => PREGNANCY_TRIMESTER_3_EXTRA_KCAL,
        _ => match profile.breastfeeding_level {
            Some(BreastfeedingLevel::Exclusive) => BREASTFEEDING_EXCLUSIVE_EXTRA_KCAL,
            Some(BreastfeedingLevel::Partial) => BREASTFEEDING_PARTIAL_EXTRA_KCAL,
            None => 0,
        },
    };

    let is_fasting_period = matches!(profile.fasting_type, Some(FastingType::Ramadan));
    let needs_hydration_reminders = is_fasting_period || profile.breastfeeding_level.is_some();

    NutritionContext {
        extra_calories,
        needs_hydration_reminders,
        is_fasting_period,
        fasting_type: profile.fasting_type,
        pregnancy_trimester: profile.pregnancy_trimester,
        breastfeeding_level: profile.breastfeeding_level,
    }
}
