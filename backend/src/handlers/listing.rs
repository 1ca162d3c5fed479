//! HTTP handlers for marketplace listings

use axum::{
    extract::{Path, State},
    Json,
};

use shared::models::Listing;

use crate::error::AppResult;
use crate::services::listing::{ListingInput, ListingService, ListingWithItem};
use crate::AppState;

/// List all listings with item names
pub async fn list_listings(State(state): State<AppState>) -> AppResult<Json<Vec<ListingWithItem>>> {
    let service = ListingService::new(state.db);
    let listings = service.list().await?;
    Ok(Json(listings))
}

/// Get a single listing
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Listing>> {
    let service = ListingService::new(state.db);
    let listing = service.get(listing_id).await?;
    Ok(Json(listing))
}

/// Create a listing
pub async fn create_listing(
    State(state): State<AppState>,
    Json(input): Json<ListingInput>,
) -> AppResult<Json<Listing>> {
    let service = ListingService::new(state.db);
    let listing = service.create(input).await?;
    Ok(Json(listing))
}

/// Update a listing
pub async fn update_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
    Json(input): Json<ListingInput>,
) -> AppResult<Json<Listing>> {
    let service = ListingService::new(state.db);
    let listing = service.update(listing_id, input).await?;
    Ok(Json(listing))
}

/// Delete a listing
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = ListingService::new(state.db);
    service.delete(listing_id).await?;
    Ok(Json(()))
}
