//! HTTP handlers for sale recording and history

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use shared::models::Sale;

use crate::error::AppResult;
use crate::services::sale::{RecordSaleInput, SaleService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SaleQuery {
    pub item_id: Option<i64>,
}

/// Record a sale against a listing
pub async fn record_sale(
    State(state): State<AppState>,
    Path(listing_id): Path<i64>,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<Json<Sale>> {
    let service = SaleService::new(state.db);
    let sale = service.record_sale(listing_id, input).await?;
    Ok(Json(sale))
}

/// List sales, optionally for one item
pub async fn list_sales(
    State(state): State<AppState>,
    Query(query): Query<SaleQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    let service = SaleService::new(state.db);
    let sales = service.get_sales(query.item_id).await?;
    Ok(Json(sales))
}
