//! CLI command implementations.

pub mod migrate;
pub mod orders;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

use smoothies_web::config::{ConfigError, WebConfig};
use smoothies_web::db::{self, RepositoryError};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} validation error(s) in seed file")]
    Validation(usize),
}

/// Connect using the same database settings as the web app.
async fn connect() -> Result<PgPool, CliError> {
    let config = WebConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    Ok(pool)
}
