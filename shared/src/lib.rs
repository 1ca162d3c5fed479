//! Shared types and domain logic for the Stockroom platform
//!
//! This crate contains the domain models and the pure computation behind the
//! backend services: cost netting, report series, and the sales forecaster.

pub mod costing;
pub mod forecast;
pub mod models;
pub mod reports;
pub mod validation;

pub use models::*;
pub use validation::*;
