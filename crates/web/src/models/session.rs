//! Session keys.
//!
//! The session carries nothing about the customer; it only bridges a
//! redirect (flash) and a kitchen render-then-save round trip (snapshot).

/// Session keys used by the route handlers.
pub mod keys {
    /// One-shot message shown on the next rendered page.
    pub const FLASH: &str = "flash";

    /// Pending-order snapshot taken when the kitchen view was rendered.
    pub const PENDING_SNAPSHOT: &str = "pending_snapshot";
}
