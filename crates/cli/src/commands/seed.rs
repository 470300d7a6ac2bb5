//! Seed the fruit options table from a YAML file.
//!
//! # File Format
//!
//! ```yaml
//! fruits:
//!   - Apples
//!   - Blueberries
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use smoothies_web::db::FruitRepository;

use super::{CliError, connect};

/// Parsed seed file.
#[derive(Debug, Deserialize)]
pub struct FruitSeedFile {
    pub fruits: Vec<String>,
}

impl FruitSeedFile {
    /// Check for blank and duplicate names.
    ///
    /// Returns one message per problem; an empty list means the file is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (index, fruit) in self.fruits.iter().enumerate() {
            let name = fruit.trim();
            if name.is_empty() {
                errors.push(format!("entry {} is blank", index + 1));
            } else if !seen.insert(name.to_lowercase()) {
                errors.push(format!("entry {} duplicates \"{name}\"", index + 1));
            }
        }

        errors
    }
}

/// Seed fruit options.
///
/// Validates the whole file before connecting. Existing names are left in
/// place unless `clear_existing` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, fails validation,
/// or a database operation fails.
pub async fn fruits(file_path: &Path, clear_existing: bool) -> Result<(), CliError> {
    info!(path = %file_path.display(), "Loading fruit options from file");

    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CliError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
    let seed: FruitSeedFile = serde_yaml::from_str(&content)?;

    let errors = seed.validate();
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CliError::Validation(errors.len()));
    }

    info!(fruits = seed.fruits.len(), "Seed file validated");

    let pool = connect().await?;
    let repo = FruitRepository::new(&pool);

    if clear_existing {
        let removed = repo.clear().await?;
        info!(removed, "Cleared existing fruit options");
    }

    let mut inserted = 0_usize;
    for fruit in &seed.fruits {
        if repo.insert_if_missing(fruit.trim()).await? {
            inserted += 1;
        }
    }

    info!(
        inserted,
        skipped = seed.fruits.len() - inserted,
        "Fruit options seeded"
    );
    Ok(())
}
