//! HTTP middleware for the web app.
//!
//! # Middleware Order (outermost first, as assembled in `main`)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)
//! 3. `TraceLayer` (request tracing, added by [`crate::app`])

pub mod flash;
pub mod session;

pub use flash::{set_flash, take_flash};
pub use session::create_session_layer;
