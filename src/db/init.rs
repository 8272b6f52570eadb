use crate::db::{DatabaseConnection, DatabaseKind, Db as _};
use crate::utils::config::DatabaseConfig;

/// Connects to a database and applies migrations.
/// The URL comes from the `[database]` config section; the `DATABASE_URL`
/// environment variable takes precedence when set.
///
/// # Errors
/// Errors if connection to database fails.
/// Connections can fail if the database file cannot be opened, or if the database URL is invalid.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db_url = config.resolved_url();
    let connection = DatabaseConnection::connect(&db_url, config.max_connections).await?;
    tracing::info!("Connected to database");
    migrate(&connection).await?;
    Ok(connection)
}

/// Apply any pending schema migrations.
///
/// # Errors
/// Errors if a migration fails to apply.
pub async fn migrate(connection: &DatabaseConnection) -> anyhow::Result<()> {
    match connection.kind {
        DatabaseKind::Sqlite => {
            sqlx::migrate!("./migrations/sqlite")
                .run(&connection.pool)
                .await?;
        }
    }
    tracing::debug!("Migrations applied");
    Ok(())
}
