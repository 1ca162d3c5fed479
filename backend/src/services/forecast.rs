//! Sales forecast service
//!
//! Resamples an item's sales into weekly totals and fits the seasonal model
//! on a blocking worker, bounded by the configured timeout.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use tokio::time::timeout;

use shared::forecast::{self, ForecastError, WeeklyPoint, WEEKS_PER_YEAR};

use crate::config::ForecastConfig;
use crate::error::{AppError, AppResult};

/// Forecast service
#[derive(Clone)]
pub struct ForecastService {
    db: PgPool,
    config: ForecastConfig,
}

/// Observed and projected weekly sales, aligned on the last observed week
#[derive(Debug, Serialize)]
pub struct SalesForecast {
    pub observed: Vec<WeeklyPoint>,
    pub forecast: Vec<WeeklyPoint>,
}

impl ForecastService {
    /// Create a new ForecastService instance
    pub fn new(db: PgPool, config: ForecastConfig) -> Self {
        Self { db, config }
    }

    /// Weekly sales forecast for one item
    pub async fn sales_forecast(
        &self,
        item_id: i64,
        horizon_weeks: Option<u32>,
    ) -> AppResult<SalesForecast> {
        let daily = sqlx::query_as::<_, (NaiveDate, i64)>(
            r#"
            SELECT date_sold, SUM(quantity)::BIGINT
            FROM sales
            WHERE item_id = $1
            GROUP BY date_sold
            ORDER BY date_sold
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.db)
        .await?;

        let observed = forecast::resample_weekly(&daily);
        let last_week = match observed.last() {
            Some(point) => point.week_ending,
            None => {
                return Err(AppError::InsufficientData(
                    "No sales history to forecast from".to_string(),
                ))
            }
        };

        let horizon = horizon_weeks.unwrap_or(self.config.horizon_weeks) as usize;
        let series: Vec<f64> = observed.iter().map(|p| p.quantity).collect();

        // Model fitting is CPU-bound and can take a while on long histories;
        // run it off the request path with a hard budget.
        let budget = Duration::from_secs(self.config.timeout_seconds);
        let fitted = timeout(
            budget,
            tokio::task::spawn_blocking(move || {
                forecast::fit_and_forecast(&series, WEEKS_PER_YEAR, horizon)
            }),
        )
        .await
        .map_err(|_| AppError::ForecastTimeout(self.config.timeout_seconds))?
        .map_err(|e| AppError::Internal(format!("Forecast task failed: {}", e)))?
        .map_err(|e| match e {
            ForecastError::InsufficientData => AppError::InsufficientData(
                "Not enough sales history to fit a forecast".to_string(),
            ),
        })?;

        let forecast = fitted
            .into_iter()
            .enumerate()
            .map(|(i, quantity)| WeeklyPoint {
                week_ending: last_week + chrono::Duration::weeks(i as i64 + 1),
                quantity,
            })
            .collect();

        Ok(SalesForecast { observed, forecast })
    }
}
