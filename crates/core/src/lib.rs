//! Smoothies Core - Shared domain types.
//!
//! This crate provides the types used by every Smoothies component:
//! - `web` - Ordering form and kitchen view (axum)
//! - `cli` - Migrations, seeding, and order inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. The `postgres` feature adds `sqlx` derives so the web and
//! cli crates can decode rows straight into these types.
//!
//! # Modules
//!
//! - [`types`] - Order ids, orders, drafts, and ingredient selections
//! - [`changes`] - Diffing the kitchen's edited snapshot against the original

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod changes;
pub mod types;

pub use changes::{
    ChangeDetectionError, ChangeSet, FulfillmentChange, detect_changes, edited_from_checked,
};
pub use types::*;
