//! Reporting service: monthly profit/margin and inventory-level series

use serde::Serialize;
use sqlx::PgPool;

use shared::models::{InventoryTransaction, Sale};
use shared::reports::{monthly_inventory_levels, monthly_profit_margin, MonthlyLevel, MonthlyProfit};

use crate::error::AppResult;
use crate::services::inventory::TransactionRow;
use crate::services::sale::SaleRow;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Monthly profit and margin for one item's sales
    pub async fn profit_report(&self, item_id: i64) -> AppResult<Vec<MonthlyProfit>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT sale_id, item_id, quantity, sale_price, acquisition_cost, date_sold
            FROM sales
            WHERE item_id = $1
            ORDER BY date_sold, sale_id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.db)
        .await?;

        let sales: Vec<Sale> = rows.into_iter().map(Into::into).collect();
        Ok(monthly_profit_margin(&sales))
    }

    /// Monthly inventory levels for one item, reconstructed from the
    /// transaction log and the current on-hand total
    pub async fn inventory_report(&self, item_id: i64) -> AppResult<Vec<MonthlyLevel>> {
        let current_total = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT SUM(quantity) FROM inventory WHERE item_id = $1",
        )
        .bind(item_id)
        .fetch_one(&self.db)
        .await?
        .unwrap_or(0);

        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT transaction_id, item_id, inventory_id, qty_change, transaction_date
            FROM inventory_transactions
            WHERE item_id = $1
            ORDER BY transaction_date, transaction_id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.db)
        .await?;

        let transactions: Vec<InventoryTransaction> = rows.into_iter().map(Into::into).collect();
        Ok(monthly_inventory_levels(current_total, &transactions))
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                crate::error::AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(wtr.into_inner().map_err(|e| {
            crate::error::AppError::Internal(format!("CSV writer error: {}", e))
        })?)
        .map_err(|e| crate::error::AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
