//! Business logic services for the Stockroom platform

pub mod forecast;
pub mod inventory;
pub mod item;
pub mod listing;
pub mod reporting;
pub mod sale;

pub use forecast::ForecastService;
pub use inventory::InventoryService;
pub use item::ItemService;
pub use listing::ListingService;
pub use reporting::ReportingService;
pub use sale::SaleService;
