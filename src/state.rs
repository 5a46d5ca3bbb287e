use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::session::{MemorySessionStore, SessionStore};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Load config and connect to the store. An unreachable database here is
    /// fatal; the process must not serve traffic without one.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let sessions =
            Arc::new(MemorySessionStore::new(&config.session_secret)) as Arc<dyn SessionStore>;

        Ok(Self {
            db,
            config,
            sessions,
        })
    }
}
