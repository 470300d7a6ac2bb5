//! Ingredient selection for a smoothie order.

use serde::{Deserialize, Serialize};

use super::order::OrderDraftError;

/// Maximum number of ingredients a single smoothie may contain.
pub const MAX_INGREDIENTS: usize = 5;

/// Separator used when the selection is stored as a single text column.
pub const INGREDIENT_SEPARATOR: &str = ", ";

/// A validated, non-empty list of ingredient names.
///
/// Blank entries are dropped and repeated names collapse onto their first
/// occurrence, so the stored string lists each ingredient once in the order
/// the customer picked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct IngredientSelection(Vec<String>);

impl IngredientSelection {
    /// Build a selection from raw form values.
    ///
    /// # Errors
    ///
    /// Returns `OrderDraftError::NoIngredients` if nothing non-blank was
    /// selected, or `OrderDraftError::TooManyIngredients` if more than
    /// [`MAX_INGREDIENTS`] distinct names were selected.
    pub fn new<I, S>(items: I) -> Result<Self, OrderDraftError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut picked: Vec<String> = Vec::new();
        for item in items {
            let name = item.as_ref().trim();
            if name.is_empty() || picked.iter().any(|p| p == name) {
                continue;
            }
            picked.push(name.to_owned());
        }

        if picked.is_empty() {
            return Err(OrderDraftError::NoIngredients);
        }
        if picked.len() > MAX_INGREDIENTS {
            return Err(OrderDraftError::TooManyIngredients {
                max: MAX_INGREDIENTS,
                selected: picked.len(),
            });
        }

        Ok(Self(picked))
    }

    /// The ingredient names joined for storage, e.g. `"Apples, Kiwi"`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join(INGREDIENT_SEPARATOR)
    }
}

impl TryFrom<Vec<String>> for IngredientSelection {
    type Error = OrderDraftError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IngredientSelection> for Vec<String> {
    fn from(selection: IngredientSelection) -> Self {
        selection.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_uses_comma_space() {
        let selection = IngredientSelection::new(["Apples", "Blueberries", "Kiwi"]).unwrap();
        assert_eq!(selection.joined(), "Apples, Blueberries, Kiwi");
    }

    #[test]
    fn test_blank_and_duplicate_entries_are_dropped() {
        let selection =
            IngredientSelection::new(["  Mango ", "", "Kiwi", "Mango", "   "]).unwrap();
        assert_eq!(Vec::<String>::from(selection), ["Mango", "Kiwi"]);
    }

    #[test]
    fn test_empty_selection_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            IngredientSelection::new(empty),
            Err(OrderDraftError::NoIngredients)
        );
        assert_eq!(
            IngredientSelection::new(["", "  "]),
            Err(OrderDraftError::NoIngredients)
        );
    }

    #[test]
    fn test_five_ingredients_allowed_six_rejected() {
        let five = ["Apples", "Banana", "Cantaloupe", "Dragon Fruit", "Elderberries"];
        let selection = IngredientSelection::new(five).unwrap();
        assert_eq!(Vec::<String>::from(selection).len(), MAX_INGREDIENTS);

        let six = [
            "Apples",
            "Banana",
            "Cantaloupe",
            "Dragon Fruit",
            "Elderberries",
            "Figs",
        ];
        assert_eq!(
            IngredientSelection::new(six),
            Err(OrderDraftError::TooManyIngredients {
                max: 5,
                selected: 6
            })
        );
    }

    #[test]
    fn test_duplicates_do_not_count_toward_cap() {
        let items = ["Kiwi", "Kiwi", "Kiwi", "Kiwi", "Kiwi", "Kiwi", "Lime"];
        let selection = IngredientSelection::new(items).unwrap();
        assert_eq!(selection.joined(), "Kiwi, Lime");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: IngredientSelection = serde_json::from_str(r#"["Kiwi","Lime"]"#).unwrap();
        assert_eq!(ok.joined(), "Kiwi, Lime");

        assert!(serde_json::from_str::<IngredientSelection>("[]").is_err());
    }
}
