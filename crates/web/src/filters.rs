//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use smoothies_core::INGREDIENT_SEPARATOR;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Number of ingredients in a stored ingredient string.
///
/// Usage in templates: `{{ order.ingredients|ingredient_count }}`
#[askama::filter_fn]
pub fn ingredient_count(value: impl Display, _env: &dyn askama::Values) -> askama::Result<usize> {
    Ok(count_ingredients(&value.to_string()))
}

/// Count the names in a `", "`-joined ingredient string, ignoring blanks.
#[must_use]
pub fn count_ingredients(stored: &str) -> usize {
    stored
        .split(INGREDIENT_SEPARATOR)
        .filter(|name| !name.trim().is_empty())
        .count()
}
