//! Business logic services

pub mod plan;
pub mod prompt;

pub use plan::{PlanOutcome, PlanService};
pub use prompt::build_prompt;
