use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::database::DatabaseConfig;
use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::migrations::Migrator;

pub type DbConn = DatabaseConnection;

/// Create a new database connection and run migrations using config
pub async fn connect() -> Result<DbConn> {
    connect_with(&CONFIG.database).await
}

/// Open the pool described by `config` and bring the schema up to date
pub async fn connect_with(config: &DatabaseConfig) -> Result<DbConn> {
    tracing::info!(
        "Connecting to database (pool {}..{})",
        config.min_connections,
        config.max_connections
    );

    let db = Database::connect(config.connect_options())
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))?;

    tracing::info!("Running database migrations...");
    Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("Database migrations completed");

    Ok(db)
}
