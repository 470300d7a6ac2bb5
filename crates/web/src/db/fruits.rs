//! Fruit option repository.
//!
//! The web app only reads this table; the CLI seeder writes it.

use sqlx::PgPool;
use tracing::instrument;

use smoothies_core::FruitOption;

use super::RepositoryError;

/// Repository for the fruit options reference table.
pub struct FruitRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FruitRepository<'a> {
    /// Create a new fruit option repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every fruit option, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FruitOption>, RepositoryError> {
        let fruits = sqlx::query_as::<_, FruitOption>(
            r"
            SELECT fruit_id AS id, fruit_name AS name
            FROM smoothies.fruit_options
            ORDER BY fruit_name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(fruits)
    }

    /// Insert a fruit option unless one with the same name exists.
    ///
    /// Returns `true` if a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_if_missing(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO smoothies.fruit_options (fruit_name)
            VALUES ($1)
            ON CONFLICT (fruit_name) DO NOTHING
            ",
        )
        .bind(name)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every fruit option.
    ///
    /// Existing orders keep their ingredient text.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM smoothies.fruit_options")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
