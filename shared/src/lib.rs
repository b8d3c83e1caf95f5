//! NutriPlan Shared Library
//!
//! This crate contains the pure domain logic of the meal-plan generator:
//! week-boundary resolution, life-phase nutrition context, energy math,
//! the generated-plan data model, and plan validation. It performs no I/O
//! so that every caller (request handling, persistence) shares the exact
//! same calendar and validation rules.

pub mod energy;
pub mod life_phase;
pub mod models;
pub mod validation;
pub mod week;

// Re-export commonly used items
pub use energy::*;
pub use life_phase::*;
pub use models::*;
pub use validation::*;
pub use week::*;
