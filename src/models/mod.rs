//! Models

/// Secret related models
pub mod secret;

pub use secret::*;
