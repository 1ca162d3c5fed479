//! Item catalog service

use serde::Deserialize;
use sqlx::PgPool;

use shared::models::Item;
use shared::validation::validate_free_text;

use crate::error::{AppError, AppResult};

/// Item service for catalog CRUD
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

/// Input for creating or updating an item
#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    item_id: i64,
    name: String,
    description: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            item_id: row.item_id,
            name: row.name,
            description: row.description,
        }
    }
}

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all items
    pub async fn list(&self) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT item_id, name, description FROM items ORDER BY item_id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a single item
    pub async fn get(&self, item_id: i64) -> AppResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT item_id, name, description FROM items WHERE item_id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Ok(row.into())
    }

    /// Create an item
    pub async fn create(&self, input: ItemInput) -> AppResult<Item> {
        validate_item_input(&input)?;

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (name, description)
            VALUES ($1, $2)
            RETURNING item_id, name, description
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update an item
    pub async fn update(&self, item_id: i64, input: ItemInput) -> AppResult<Item> {
        validate_item_input(&input)?;

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items SET name = $1, description = $2
            WHERE item_id = $3
            RETURNING item_id, name, description
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Ok(row.into())
    }

    /// Delete an item. Refused while any inventory lot still references it.
    pub async fn delete(&self, item_id: i64) -> AppResult<()> {
        let has_inventory = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM inventory WHERE item_id = $1)",
        )
        .bind(item_id)
        .fetch_one(&self.db)
        .await?;

        if has_inventory {
            return Err(AppError::Conflict(
                "Cannot delete an item that has inventory allocated. Please delete inventory first."
                    .to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM items WHERE item_id = $1")
            .bind(item_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item".to_string()));
        }

        Ok(())
    }
}

fn validate_item_input(input: &ItemInput) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Item name is required".to_string(),
        });
    }
    validate_free_text(&input.description).map_err(|message| AppError::Validation {
        field: "description".to_string(),
        message: message.to_string(),
    })?;
    Ok(())
}
