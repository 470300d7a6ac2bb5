//! Session-held models for the web app.

pub mod flash;
pub mod session;

pub use flash::{Flash, FlashLevel};
