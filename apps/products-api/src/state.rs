//! Application state management

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state
///
/// Owns the one connection pool of the process; routers get clones of it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        Self { config, db }
    }
}
