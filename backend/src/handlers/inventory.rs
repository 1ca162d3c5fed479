//! HTTP handlers for inventory management endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use shared::models::{InventoryLot, InventoryTransaction};

use crate::error::AppResult;
use crate::services::inventory::{AddLotInput, InventoryService, UpdateLotInput};
use crate::services::reporting::ReportingService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LotQuery {
    pub item_id: Option<i64>,
}

/// List inventory lots, optionally for one item
pub async fn list_lots(
    State(state): State<AppState>,
    Query(query): Query<LotQuery>,
) -> AppResult<Json<Vec<InventoryLot>>> {
    let service = InventoryService::new(state.db);
    let lots = service.get_lots(query.item_id).await?;
    Ok(Json(lots))
}

/// Get a single lot
pub async fn get_lot(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
) -> AppResult<Json<InventoryLot>> {
    let service = InventoryService::new(state.db);
    let lot = service.get_lot(inventory_id).await?;
    Ok(Json(lot))
}

/// Add stock; merges into an existing lot at the same (item, location)
pub async fn add_lot(
    State(state): State<AppState>,
    Json(input): Json<AddLotInput>,
) -> AppResult<Json<InventoryLot>> {
    let service = InventoryService::new(state.db);
    let lot = service.add_lot(input).await?;
    Ok(Json(lot))
}

/// Edit a lot
pub async fn update_lot(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
    Json(input): Json<UpdateLotInput>,
) -> AppResult<Json<InventoryLot>> {
    let service = InventoryService::new(state.db);
    let lot = service.update_lot(inventory_id, input).await?;
    Ok(Json(lot))
}

/// Delete a lot; its transaction history is kept
pub async fn delete_lot(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
) -> AppResult<Json<()>> {
    let service = InventoryService::new(state.db);
    service.delete_lot(inventory_id).await?;
    Ok(Json(()))
}

/// List the inventory transaction log, optionally for one item
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<LotQuery>,
) -> AppResult<Json<Vec<InventoryTransaction>>> {
    let service = InventoryService::new(state.db);
    let transactions = service.get_transactions(query.item_id).await?;
    Ok(Json(transactions))
}

/// Download the inventory list (with item names) as CSV
pub async fn export_inventory_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = InventoryService::new(state.db);
    let rows = service.list_with_items().await?;
    let csv = ReportingService::export_to_csv(&rows)?;

    let filename = format!(
        "inventory_download_{}.csv",
        Utc::now().format("%Y-%m-%d_%H-%M-%S")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
