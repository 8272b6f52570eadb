//! Application configuration loaded from a TOML file.
use serde_derive::{Deserialize, Serialize};
use std::env;
use std::fs::read_to_string;
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "unidash.toml";

/// Database used when neither the config file nor `DATABASE_URL` name one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://unidash.sqlite3?mode=rwc";

/// Top level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Professor listing behaviour.
    pub professors: ProfessorsConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_owned(),
            port: 8000,
        }
    }
}

/// `[database]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL. Only `sqlite:` URLs are supported.
    pub url: Option<String>,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 50,
        }
    }
}

impl DatabaseConfig {
    /// URL to connect to.
    #[must_use]
    pub fn resolved_url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned())
    }
}

/// `[professors]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfessorsConfig {
    /// Apply the `start_date`/`end_date` publication filter on the professor
    /// listing. Off by default: the parameters are accepted and ignored.
    pub publication_date_filter: bool,
}

impl Config {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    /// Errors if the text is not valid TOML or has fields of the wrong type.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let conf: Self = toml::from_str(text)?;
        Ok(conf)
    }

    /// Load the config file at `path`, falling back to defaults when the file
    /// does not exist. `DATABASE_URL` overrides `database.url`.
    ///
    /// # Errors
    /// Errors if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut conf = if path.exists() {
            let config_str = read_to_string(path)?;
            Self::parse(&config_str)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        if let Ok(url) = env::var("DATABASE_URL") {
            conf.database.url = Some(url);
        }
        Ok(conf)
    }
}
