//! Database models for the Stockroom platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
