//! Integration tests for Smoothies.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no database needed)
//! cargo test -p smoothies-integration-tests
//!
//! # Repository tests against a scratch database
//! SMOOTHIES_TEST_DATABASE_URL=postgres://localhost/smoothies_test \
//!     cargo test -p smoothies-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `change_detection`, `order_drafts` - Core logic through the public API
//! - `web_routes` - Router behavior that never reaches the database
//! - `repositories` - Queries against a real `PostgreSQL` (ignored by default)

use std::collections::HashMap;

use axum::Router;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use smoothies_web::config::WebConfig;
use smoothies_web::state::AppState;

/// Environment variable naming the scratch database for ignored tests.
pub const TEST_DATABASE_URL_VAR: &str = "SMOOTHIES_TEST_DATABASE_URL";

/// Address nothing listens on, so any query fails fast.
const UNREACHABLE_DATABASE_URL: &str = "postgres://smoothies@127.0.0.1:1/smoothies";

/// Configuration pointing at the bundled static assets.
///
/// # Panics
///
/// Panics if the hardcoded values stop parsing.
#[must_use]
pub fn test_config(database_url: &str) -> WebConfig {
    let vars = HashMap::from([
        ("SMOOTHIES_DATABASE_URL", database_url.to_string()),
        (
            "SMOOTHIES_STATIC_DIR",
            concat!(env!("CARGO_MANIFEST_DIR"), "/../web/static").to_string(),
        ),
    ]);

    WebConfig::from_source(|key| vars.get(key).cloned()).expect("valid test configuration")
}

/// The full router with an in-memory session store and a pool that never
/// connects.
#[must_use]
pub fn test_app() -> Router {
    test_app_with(Router::new())
}

/// Like [`test_app`], with extra routes sharing the same session layer.
///
/// Tests use this to put values into a session before calling a handler.
///
/// # Panics
///
/// Panics if the lazy pool cannot be built from the hardcoded URL.
#[must_use]
pub fn test_app_with(extra: Router) -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(1))
        .connect_lazy(UNREACHABLE_DATABASE_URL)
        .expect("valid database URL");

    let state = AppState::new(test_config(UNREACHABLE_DATABASE_URL), pool);
    let sessions = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    smoothies_web::app(state).merge(extra).layer(sessions)
}

/// Connect to the scratch database and apply migrations.
///
/// Returns `None` when the scratch database is not configured.
///
/// # Panics
///
/// Panics if the database is configured but unreachable, or a migration fails.
pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var(TEST_DATABASE_URL_VAR).ok()?;

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("../web/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}
