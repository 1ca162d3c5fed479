//! HTTP handlers for the item catalog

use axum::{
    extract::{Path, State},
    Json,
};

use shared::models::Item;

use crate::error::AppResult;
use crate::services::item::{ItemInput, ItemService};
use crate::AppState;

/// List all items
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.db);
    let items = service.list().await?;
    Ok(Json(items))
}

/// Get a single item
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.get(item_id).await?;
    Ok(Json(item))
}

/// Create an item
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<ItemInput>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.create(input).await?;
    Ok(Json(item))
}

/// Update an item
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.update(item_id, input).await?;
    Ok(Json(item))
}

/// Delete an item (refused while inventory references it)
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = ItemService::new(state.db);
    service.delete(item_id).await?;
    Ok(Json(()))
}
