//! Route definitions for the Stockroom platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Item catalog
        .nest("/items", item_routes())
        // Inventory ledger
        .nest("/inventory", inventory_routes())
        // Marketplace listings
        .nest("/listings", listing_routes())
        // Sale history
        .nest("/sales", sale_routes())
        // Reports and forecast
        .nest("/reports", report_routes())
        // Carrier integration
        .nest("/shipping", shipping_routes())
}

/// Item catalog routes
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/:item_id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
}

/// Inventory ledger routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots).post(handlers::add_lot))
        .route("/export", get(handlers::export_inventory_csv))
        .route("/transactions", get(handlers::list_transactions))
        .route(
            "/:inventory_id",
            get(handlers::get_lot)
                .put(handlers::update_lot)
                .delete(handlers::delete_lot),
        )
}

/// Listing management routes
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_listings).post(handlers::create_listing),
        )
        .route(
            "/:listing_id",
            get(handlers::get_listing)
                .put(handlers::update_listing)
                .delete(handlers::delete_listing),
        )
        .route("/:listing_id/sale", post(handlers::record_sale))
}

/// Sale history routes
fn sale_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_sales))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/profit", get(handlers::profit_report))
        .route("/inventory", get(handlers::inventory_report))
        .route("/forecast", get(handlers::sales_forecast))
}

/// Shipping routes
fn shipping_routes() -> Router<AppState> {
    Router::new()
        .route("/rates", post(handlers::get_rates))
        .route("/label", post(handlers::generate_label))
}
