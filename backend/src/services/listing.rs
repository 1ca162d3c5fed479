//! Marketplace listing service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use shared::models::{Listing, ListingStatus, Website};
use shared::validation::validate_positive_quantity;

use crate::error::{AppError, AppResult};

/// Listing service for marketplace listing CRUD
#[derive(Clone)]
pub struct ListingService {
    db: PgPool,
}

/// Input for creating or updating a listing
#[derive(Debug, Deserialize)]
pub struct ListingInput {
    pub item_id: i64,
    pub quantity: i32,
    pub website: Website,
    pub url: String,
    pub status: ListingStatus,
    pub unit_price: Decimal,
}

/// Listing joined with its item name for the manage-listings view
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ListingWithItem {
    pub listing_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub website: String,
    pub url: String,
    pub status: String,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ListingRow {
    pub(crate) listing_id: i64,
    pub(crate) item_id: i64,
    pub(crate) quantity: i32,
    pub(crate) website: String,
    pub(crate) url: String,
    pub(crate) status: String,
    pub(crate) unit_price: Decimal,
}

impl ListingRow {
    pub(crate) fn into_model(self) -> AppResult<Listing> {
        let website = Website::from_str(&self.website)
            .ok_or_else(|| AppError::Internal(format!("Unknown website value: {}", self.website)))?;
        let status = ListingStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown listing status: {}", self.status)))?;

        Ok(Listing {
            listing_id: self.listing_id,
            item_id: self.item_id,
            quantity: self.quantity,
            website,
            url: self.url,
            status,
            unit_price: self.unit_price,
        })
    }
}

impl ListingService {
    /// Create a new ListingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all listings with their item names
    pub async fn list(&self) -> AppResult<Vec<ListingWithItem>> {
        let rows = sqlx::query_as::<_, ListingWithItem>(
            r#"
            SELECT l.listing_id, l.item_id, it.name AS item_name,
                   l.quantity, l.website, l.url, l.status
            FROM listings l
            JOIN items it ON it.item_id = l.item_id
            ORDER BY l.listing_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Get a single listing
    pub async fn get(&self, listing_id: i64) -> AppResult<Listing> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT listing_id, item_id, quantity, website, url, status, unit_price
            FROM listings
            WHERE listing_id = $1
            "#,
        )
        .bind(listing_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing".to_string()))?;

        row.into_model()
    }

    /// Create a listing
    pub async fn create(&self, input: ListingInput) -> AppResult<Listing> {
        self.validate_input(&input).await?;

        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            INSERT INTO listings (item_id, quantity, website, url, status, unit_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING listing_id, item_id, quantity, website, url, status, unit_price
            "#,
        )
        .bind(input.item_id)
        .bind(input.quantity)
        .bind(input.website.as_str())
        .bind(&input.url)
        .bind(input.status.as_str())
        .bind(input.unit_price)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Update a listing
    pub async fn update(&self, listing_id: i64, input: ListingInput) -> AppResult<Listing> {
        self.validate_input(&input).await?;

        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            UPDATE listings
            SET item_id = $1, quantity = $2, website = $3, url = $4, status = $5, unit_price = $6
            WHERE listing_id = $7
            RETURNING listing_id, item_id, quantity, website, url, status, unit_price
            "#,
        )
        .bind(input.item_id)
        .bind(input.quantity)
        .bind(input.website.as_str())
        .bind(&input.url)
        .bind(input.status.as_str())
        .bind(input.unit_price)
        .bind(listing_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing".to_string()))?;

        row.into_model()
    }

    /// Delete a listing
    pub async fn delete(&self, listing_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM listings WHERE listing_id = $1")
            .bind(listing_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Listing".to_string()));
        }

        Ok(())
    }

    async fn validate_input(&self, input: &ListingInput) -> AppResult<()> {
        validate_positive_quantity(input.quantity).map_err(|message| AppError::Validation {
            field: "quantity".to_string(),
            message: message.to_string(),
        })?;
        if input.unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Listing price cannot be negative".to_string(),
            });
        }

        let item_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM items WHERE item_id = $1)")
                .bind(input.item_id)
                .fetch_one(&self.db)
                .await?;
        if !item_exists {
            return Err(AppError::NotFound("Item".to_string()));
        }

        Ok(())
    }
}
