// src/state.rs

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{config::Config, services::ProgressStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub progress: ProgressStore,
}

impl AppState {
    /// Wires the default SQLite-backed progress store onto `pool`.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            progress: ProgressStore::sqlite(pool.clone()),
            pool,
            config,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ProgressStore {
    fn from_ref(state: &AppState) -> Self {
        state.progress.clone()
    }
}
