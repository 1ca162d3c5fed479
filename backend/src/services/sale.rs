//! Sale recording and history

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use shared::models::Sale;
use shared::validation::validate_positive_quantity;

use crate::error::{AppError, AppResult};
use crate::services::listing::ListingRow;

/// Sale service: decrements listings and appends immutable sale records
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Input for recording a sale against a listing
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    pub quantity: i32,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SaleRow {
    pub(crate) sale_id: i64,
    pub(crate) item_id: i64,
    pub(crate) quantity: i32,
    pub(crate) sale_price: Decimal,
    pub(crate) acquisition_cost: Decimal,
    pub(crate) date_sold: NaiveDate,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale {
            sale_id: row.sale_id,
            item_id: row.item_id,
            quantity: row.quantity,
            sale_price: row.sale_price,
            acquisition_cost: row.acquisition_cost,
            date_sold: row.date_sold,
        }
    }
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a sale against a listing.
    ///
    /// Inside one database transaction: the listing's quantity is
    /// decremented (flipping its status to sold when it reaches zero), the
    /// item's current average inventory cost is snapshotted as the sale's
    /// acquisition cost, and the sale row is inserted dated today. An item
    /// sold with no tracked inventory is recorded at zero cost.
    pub async fn record_sale(&self, listing_id: i64, input: RecordSaleInput) -> AppResult<Sale> {
        validate_positive_quantity(input.quantity).map_err(|message| AppError::Validation {
            field: "quantity".to_string(),
            message: message.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let listing = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT listing_id, item_id, quantity, website, url, status, unit_price
            FROM listings
            WHERE listing_id = $1
            FOR UPDATE
            "#,
        )
        .bind(listing_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing".to_string()))?;

        if input.quantity > listing.quantity {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot exceed listing quantity".to_string(),
            });
        }

        let mut updated = listing.into_model()?;
        updated.apply_sale(input.quantity);

        sqlx::query("UPDATE listings SET quantity = $1, status = $2 WHERE listing_id = $3")
            .bind(updated.quantity)
            .bind(updated.status.as_str())
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;

        let acquisition_cost = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT unit_cost FROM inventory
            WHERE item_id = $1
            ORDER BY inventory_id
            LIMIT 1
            "#,
        )
        .bind(updated.item_id)
        .fetch_optional(&mut *tx)
        .await?
        .unwrap_or(Decimal::ZERO);

        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            INSERT INTO sales (item_id, quantity, sale_price, acquisition_cost, date_sold)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING sale_id, item_id, quantity, sale_price, acquisition_cost, date_sold
            "#,
        )
        .bind(updated.item_id)
        .bind(input.quantity)
        .bind(updated.unit_price)
        .bind(acquisition_cost)
        .bind(Utc::now().date_naive())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// List sales, optionally restricted to one item
    pub async fn get_sales(&self, item_id: Option<i64>) -> AppResult<Vec<Sale>> {
        let rows = match item_id {
            Some(item_id) => {
                sqlx::query_as::<_, SaleRow>(
                    r#"
                    SELECT sale_id, item_id, quantity, sale_price, acquisition_cost, date_sold
                    FROM sales
                    WHERE item_id = $1
                    ORDER BY date_sold, sale_id
                    "#,
                )
                .bind(item_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, SaleRow>(
                    r#"
                    SELECT sale_id, item_id, quantity, sale_price, acquisition_cost, date_sold
                    FROM sales
                    ORDER BY date_sold, sale_id
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
