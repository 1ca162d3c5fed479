//! Inventory models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A quantity of one item held at one location, carrying its own average
/// unit cost. At most one lot exists per (item, location) pair; additions at
/// the same location merge into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLot {
    pub inventory_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub location: String,
    pub unit_cost: Decimal,
}

/// An immutable record of one quantity change against a lot. The log is
/// append-only and outlives the lot it points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub transaction_id: i64,
    pub item_id: i64,
    pub inventory_id: i64,
    pub qty_change: i32,
    pub transaction_date: NaiveDate,
}
