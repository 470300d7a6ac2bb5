//! Selectable ingredient reference data.

use serde::{Deserialize, Serialize};

use super::FruitId;

/// A row of the fruit options reference table.
///
/// The ordering form offers these names; orders store the chosen names as
/// text, so renaming or removing an option never rewrites history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct FruitOption {
    pub id: FruitId,
    pub name: String,
}
