//! Smoothie orders.
//!
//! An order is created once by the ordering form and afterwards only its
//! `filled` flag changes. Identifier, timestamp, and the initial flag are
//! assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{IngredientSelection, OrderId};

/// Reasons an order submission is rejected before anything is written.
///
/// The `Display` text is shown to the customer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderDraftError {
    #[error("Please enter a name for the order.")]
    EmptyName,

    #[error("Choose at least one ingredient.")]
    NoIngredients,

    #[error("Choose up to {max} ingredients (you picked {selected}).")]
    TooManyIngredients { max: usize, selected: usize },
}

/// A persisted smoothie order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Order {
    pub id: OrderId,
    pub filled: bool,
    pub name: String,
    /// Ingredient names joined with [`super::INGREDIENT_SEPARATOR`].
    pub ingredients: String,
    pub created_at: DateTime<Utc>,
}

/// The slice of an order the kitchen can change.
///
/// A list of these is the snapshot that change detection compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub id: OrderId,
    pub filled: bool,
}

impl PendingOrder {
    #[must_use]
    pub const fn new(id: OrderId, filled: bool) -> Self {
        Self { id, filled }
    }
}

impl From<&Order> for PendingOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            filled: order.filled,
        }
    }
}

/// A validated order submission, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    name: String,
    ingredients: IngredientSelection,
}

impl OrderDraft {
    /// Validate a raw submission from the ordering form.
    ///
    /// The name is checked before the ingredients, so a form with neither
    /// reports the missing name first.
    ///
    /// # Errors
    ///
    /// Returns `OrderDraftError::EmptyName` if the trimmed name is empty, or
    /// any error from [`IngredientSelection::new`].
    pub fn parse<I, S>(name: &str, ingredients: I) -> Result<Self, OrderDraftError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(OrderDraftError::EmptyName);
        }

        Ok(Self {
            name: name.to_owned(),
            ingredients: IngredientSelection::new(ingredients)?,
        })
    }

    /// Name on the order, trimmed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ingredients(&self) -> &IngredientSelection {
        &self.ingredients
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_name() {
        let draft = OrderDraft::parse("  Kevin  ", ["Apples"]).unwrap();
        assert_eq!(draft.name(), "Kevin");
        assert_eq!(draft.ingredients().joined(), "Apples");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            OrderDraft::parse("", ["Apples"]),
            Err(OrderDraftError::EmptyName)
        );
        assert_eq!(
            OrderDraft::parse("   ", ["Apples"]),
            Err(OrderDraftError::EmptyName)
        );
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let none: Vec<String> = Vec::new();
        assert_eq!(
            OrderDraft::parse("Divya", none),
            Err(OrderDraftError::NoIngredients)
        );
    }

    #[test]
    fn test_name_checked_before_ingredients() {
        let none: Vec<String> = Vec::new();
        assert_eq!(OrderDraft::parse("", none), Err(OrderDraftError::EmptyName));
    }

    #[test]
    fn test_error_messages_are_customer_facing() {
        assert_eq!(
            OrderDraftError::TooManyIngredients {
                max: 5,
                selected: 7
            }
            .to_string(),
            "Choose up to 5 ingredients (you picked 7)."
        );
    }

    #[test]
    fn test_pending_order_from_order() {
        let order = Order {
            id: OrderId::new(3),
            filled: false,
            name: "Xi".to_string(),
            ingredients: "Kiwi, Lime".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(
            PendingOrder::from(&order),
            PendingOrder::new(OrderId::new(3), false)
        );
    }
}
