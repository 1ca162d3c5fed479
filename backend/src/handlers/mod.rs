//! HTTP handlers for the Stockroom platform

pub mod health;
pub mod inventory;
pub mod item;
pub mod listing;
pub mod reporting;
pub mod sale;
pub mod shipping;

pub use health::*;
pub use inventory::*;
pub use item::*;
pub use listing::*;
pub use reporting::*;
pub use sale::*;
pub use shipping::*;
