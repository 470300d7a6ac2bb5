//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Ordering
//! GET  /                       - Ordering form
//! POST /order                  - Submit order (redirects to /)
//! POST /order/preview          - Ingredient preview fragment (HTMX)
//!
//! # Kitchen
//! GET  /kitchen                - Pending orders
//! POST /kitchen                - Save filled flags (redirects to /kitchen)
//! ```

pub mod health;
pub mod kitchen;
pub mod ordering;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the web app.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Ordering screen
        .route("/", get(ordering::index))
        .route("/order", post(ordering::submit))
        .route("/order/preview", post(ordering::preview))
        // Kitchen screen
        .route("/kitchen", get(kitchen::index).post(kitchen::save))
        // Health
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}
