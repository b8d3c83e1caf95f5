//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod plan;

pub use plan::{SaveWeeklyPlan, WeeklyPlanRecord, WeeklyPlanRepository};
