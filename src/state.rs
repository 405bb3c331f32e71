use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;

/// Process-wide handles shared by every request
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
