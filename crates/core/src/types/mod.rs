//! Core types for Smoothies.
//!
//! This module provides type-safe wrappers for the order domain.

pub mod fruit;
pub mod id;
pub mod ingredients;
pub mod order;

pub use fruit::FruitOption;
pub use id::{FruitId, OrderId};
pub use ingredients::{INGREDIENT_SEPARATOR, IngredientSelection, MAX_INGREDIENTS};
pub use order::{Order, OrderDraft, OrderDraftError, PendingOrder};
