//! Inventory ledger service: lots, cost netting, and the transaction log

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use shared::costing::weighted_average_cost;
use shared::models::{InventoryLot, InventoryTransaction};
use shared::validation::{validate_location, validate_positive_quantity};

use crate::error::{AppError, AppResult};

/// Inventory service owning lot lifecycles and the quantity-change log
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Input for adding stock to inventory
#[derive(Debug, Deserialize)]
pub struct AddLotInput {
    pub item_id: i64,
    pub quantity: i32,
    pub location: String,
    pub unit_cost: Decimal,
}

/// Input for editing an existing lot
#[derive(Debug, Deserialize)]
pub struct UpdateLotInput {
    pub quantity: i32,
    pub location: String,
    pub unit_cost: Decimal,
}

/// Lot joined with its item name for list views and CSV export
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LotWithItem {
    pub inventory_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub location: String,
    pub unit_cost: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct LotRow {
    inventory_id: i64,
    item_id: i64,
    quantity: i32,
    location: String,
    unit_cost: Decimal,
}

impl From<LotRow> for InventoryLot {
    fn from(row: LotRow) -> Self {
        InventoryLot {
            inventory_id: row.inventory_id,
            item_id: row.item_id,
            quantity: row.quantity,
            location: row.location,
            unit_cost: row.unit_cost,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TransactionRow {
    pub(crate) transaction_id: i64,
    pub(crate) item_id: i64,
    pub(crate) inventory_id: i64,
    pub(crate) qty_change: i32,
    pub(crate) transaction_date: NaiveDate,
}

impl From<TransactionRow> for InventoryTransaction {
    fn from(row: TransactionRow) -> Self {
        InventoryTransaction {
            transaction_id: row.transaction_id,
            item_id: row.item_id,
            inventory_id: row.inventory_id,
            qty_change: row.qty_change,
            transaction_date: row.transaction_date,
        }
    }
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add stock for an item at a location.
    ///
    /// An existing lot at the same (item, location) absorbs the addition:
    /// its quantity grows and its unit cost becomes the quantity-weighted
    /// average of the old and new stock. Either way the quantity change
    /// lands in the transaction log, inside the same database transaction
    /// as the lot write.
    pub async fn add_lot(&self, input: AddLotInput) -> AppResult<InventoryLot> {
        validate_positive_quantity(input.quantity).map_err(|message| AppError::Validation {
            field: "quantity".to_string(),
            message: message.to_string(),
        })?;
        validate_location(&input.location).map_err(|message| AppError::Validation {
            field: "location".to_string(),
            message: message.to_string(),
        })?;
        if input.unit_cost < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_cost".to_string(),
                message: "Unit cost cannot be negative".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let item_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM items WHERE item_id = $1)")
                .bind(input.item_id)
                .fetch_one(&mut *tx)
                .await?;
        if !item_exists {
            return Err(AppError::NotFound("Item".to_string()));
        }

        let existing = sqlx::query_as::<_, LotRow>(
            r#"
            SELECT inventory_id, item_id, quantity, location, unit_cost
            FROM inventory
            WHERE item_id = $1 AND location = $2
            FOR UPDATE
            "#,
        )
        .bind(input.item_id)
        .bind(&input.location)
        .fetch_optional(&mut *tx)
        .await?;

        let today = Utc::now().date_naive();

        let lot = match existing {
            Some(existing) => {
                let total_quantity = existing.quantity + input.quantity;
                let average_cost = weighted_average_cost(
                    existing.quantity,
                    existing.unit_cost,
                    input.quantity,
                    input.unit_cost,
                );

                let row = sqlx::query_as::<_, LotRow>(
                    r#"
                    UPDATE inventory SET quantity = $1, unit_cost = $2
                    WHERE inventory_id = $3
                    RETURNING inventory_id, item_id, quantity, location, unit_cost
                    "#,
                )
                .bind(total_quantity)
                .bind(average_cost)
                .bind(existing.inventory_id)
                .fetch_one(&mut *tx)
                .await?;

                append_transaction(
                    &mut tx,
                    input.item_id,
                    existing.inventory_id,
                    input.quantity,
                    today,
                )
                .await?;
                row
            }
            None => {
                let row = sqlx::query_as::<_, LotRow>(
                    r#"
                    INSERT INTO inventory (item_id, quantity, location, unit_cost)
                    VALUES ($1, $2, $3, $4)
                    RETURNING inventory_id, item_id, quantity, location, unit_cost
                    "#,
                )
                .bind(input.item_id)
                .bind(input.quantity)
                .bind(&input.location)
                .bind(input.unit_cost)
                .fetch_one(&mut *tx)
                .await?;

                append_transaction(&mut tx, input.item_id, row.inventory_id, input.quantity, today)
                    .await?;
                row
            }
        };

        tx.commit().await?;
        Ok(lot.into())
    }

    /// Edit a lot's quantity, cost, or location. A quantity change is
    /// recorded in the transaction log in the same database transaction as
    /// the update.
    pub async fn update_lot(
        &self,
        inventory_id: i64,
        input: UpdateLotInput,
    ) -> AppResult<InventoryLot> {
        if input.quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
            });
        }
        validate_location(&input.location).map_err(|message| AppError::Validation {
            field: "location".to_string(),
            message: message.to_string(),
        })?;
        if input.unit_cost < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_cost".to_string(),
                message: "Unit cost cannot be negative".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let prior = sqlx::query_as::<_, LotRow>(
            r#"
            SELECT inventory_id, item_id, quantity, location, unit_cost
            FROM inventory
            WHERE inventory_id = $1
            FOR UPDATE
            "#,
        )
        .bind(inventory_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory lot".to_string()))?;

        if input.quantity != prior.quantity {
            append_transaction(
                &mut tx,
                prior.item_id,
                inventory_id,
                input.quantity - prior.quantity,
                Utc::now().date_naive(),
            )
            .await?;
        }

        let row = sqlx::query_as::<_, LotRow>(
            r#"
            UPDATE inventory SET quantity = $1, location = $2, unit_cost = $3
            WHERE inventory_id = $4
            RETURNING inventory_id, item_id, quantity, location, unit_cost
            "#,
        )
        .bind(input.quantity)
        .bind(&input.location)
        .bind(input.unit_cost)
        .bind(inventory_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Remove a lot. Its transaction history is kept.
    pub async fn delete_lot(&self, inventory_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE inventory_id = $1")
            .bind(inventory_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Inventory lot".to_string()));
        }

        Ok(())
    }

    /// Get a single lot
    pub async fn get_lot(&self, inventory_id: i64) -> AppResult<InventoryLot> {
        let row = sqlx::query_as::<_, LotRow>(
            r#"
            SELECT inventory_id, item_id, quantity, location, unit_cost
            FROM inventory
            WHERE inventory_id = $1
            "#,
        )
        .bind(inventory_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory lot".to_string()))?;

        Ok(row.into())
    }

    /// List lots, optionally restricted to one item
    pub async fn get_lots(&self, item_id: Option<i64>) -> AppResult<Vec<InventoryLot>> {
        let rows = match item_id {
            Some(item_id) => {
                sqlx::query_as::<_, LotRow>(
                    r#"
                    SELECT inventory_id, item_id, quantity, location, unit_cost
                    FROM inventory
                    WHERE item_id = $1
                    ORDER BY inventory_id
                    "#,
                )
                .bind(item_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, LotRow>(
                    r#"
                    SELECT inventory_id, item_id, quantity, location, unit_cost
                    FROM inventory
                    ORDER BY inventory_id
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List lots joined with item names, for the inventory list page and CSV
    /// export
    pub async fn list_with_items(&self) -> AppResult<Vec<LotWithItem>> {
        let rows = sqlx::query_as::<_, LotWithItem>(
            r#"
            SELECT i.inventory_id, i.item_id, it.name AS item_name,
                   i.quantity, i.location, i.unit_cost
            FROM inventory i
            JOIN items it ON it.item_id = i.item_id
            ORDER BY i.inventory_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// List the transaction log, optionally restricted to one item
    pub async fn get_transactions(
        &self,
        item_id: Option<i64>,
    ) -> AppResult<Vec<InventoryTransaction>> {
        let rows = match item_id {
            Some(item_id) => {
                sqlx::query_as::<_, TransactionRow>(
                    r#"
                    SELECT transaction_id, item_id, inventory_id, qty_change, transaction_date
                    FROM inventory_transactions
                    WHERE item_id = $1
                    ORDER BY transaction_date, transaction_id
                    "#,
                )
                .bind(item_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, TransactionRow>(
                    r#"
                    SELECT transaction_id, item_id, inventory_id, qty_change, transaction_date
                    FROM inventory_transactions
                    ORDER BY transaction_date, transaction_id
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Append one entry to the quantity-change log inside an open transaction
async fn append_transaction(
    tx: &mut Transaction<'_, Postgres>,
    item_id: i64,
    inventory_id: i64,
    qty_change: i32,
    transaction_date: NaiveDate,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO inventory_transactions (item_id, inventory_id, qty_change, transaction_date)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(item_id)
    .bind(inventory_id)
    .bind(qty_change)
    .bind(transaction_date)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
