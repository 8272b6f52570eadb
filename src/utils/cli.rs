//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::db;
use crate::server::app::serve;
use crate::utils::config::{Config, DEFAULT_CONFIG_FILE};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Admin backend for university students, professors, degrees and publications.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file. A missing file means all defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Unidash cli subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

///
#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Serve the JSON API and admin registry over HTTP
    Serve {
        /// Address to bind to. Overrides `server.bind`.
        #[arg(short, long)]
        bind: Option<String>,
        /// Port to listen on. Overrides `server.port`.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply database migrations and exit
    Migrate,
}

/// Log to stdout, honouring `RUST_LOG` and defaulting to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect, migrate and report the outcome.
#[actix_web::main]
async fn migrate(config: Config) -> std::io::Result<()> {
    match db::init::connect(&config.database).await {
        Ok(_) => {
            tracing::info!(
                "Database at {} is up to date",
                config.database.resolved_url()
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!("error: could not migrate database.");
            tracing::error!("Error: {:?}", err);
            std::process::exit(1);
        }
    }
}

/// Main entrypoint to application
///
/// # Errors
/// Errors if the server cannot bind to its address.
pub fn run() -> std::io::Result<()> {
    init_tracing();
    tracing::debug!("Starting application");
    let cli = Cli::parse();
    let mut config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(
                "error: could not load config from `{}`",
                cli.config.display()
            );
            tracing::error!("Error: {:?}", err);
            std::process::exit(1);
        }
    };

    match cli.subcommands {
        Subcommands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config)
        }
        Subcommands::Migrate => migrate(config),
    }
}
