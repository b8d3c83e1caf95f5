//! Application state management
//!
//! Shared state passed to all request handlers via Axum's state
//! extraction. Every field is cheap to clone (pool and Arcs), and the
//! state is read-only during request handling.

use crate::config::AppConfig;
use crate::generator::PlanGenerator;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Plan generator client
    pub generator: Arc<dyn PlanGenerator>,
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig, generator: Arc<dyn PlanGenerator>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            generator,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the generator client
    #[inline]
    pub fn generator(&self) -> &dyn PlanGenerator {
        self.generator.as_ref()
    }
}
