//! Access-token model and the store-backed cache that owns it.

pub mod cache;
pub mod secret;

pub use cache::*;
pub use secret::*;
