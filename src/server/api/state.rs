//! Centralized state management for the Actix web server
use crate::{db, utils::config::Config};

/// Global, read-only state
pub trait Global {
    /// Database connection
    fn db(&self) -> &db::DatabaseConnection;
    /// Loaded configuration
    fn config(&self) -> &Config;
}

/// Application state
#[derive(Debug, Clone)]
pub struct App {
    /// Database connection
    pub db: db::DatabaseConnection,
    /// Loaded configuration
    pub config: Config,
}

impl Global for App {
    fn db(&self) -> &db::DatabaseConnection {
        &self.db
    }

    fn config(&self) -> &Config {
        &self.config
    }
}
