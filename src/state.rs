use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt_secret: Arc<str>,
    pub token_ttl_hours: i64,
    /// Show the cause of 500 responses to clients.
    pub debug: bool,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        let orm = orm_from_pool(&pool);
        Self {
            pool,
            orm,
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            token_ttl_hours: config.token_ttl_hours,
            debug: config.debug,
        }
    }
}
