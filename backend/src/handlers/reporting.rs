//! HTTP handlers for reports and the sales forecast

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::forecast::{ForecastService, SalesForecast};
use crate::services::reporting::ReportingService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub item_id: i64,
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub item_id: i64,
    pub horizon_weeks: Option<u32>,
}

/// Monthly profit and margin report
pub async fn profit_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db);
    let data = service.profit_report(query.item_id).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"profit_report.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

/// Monthly inventory level report
pub async fn inventory_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db);
    let data = service.inventory_report(query.item_id).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"inventory_report.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

/// Weekly sales forecast
pub async fn sales_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<SalesForecast>> {
    let service = ForecastService::new(state.db.clone(), state.config.forecast.clone());
    let forecast = service
        .sales_forecast(query.item_id, query.horizon_weeks)
        .await?;
    Ok(Json(forecast))
}
