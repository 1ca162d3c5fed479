//! Item catalog models

use serde::{Deserialize, Serialize};

/// An item that can be stocked, listed, and sold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: i64,
    pub name: String,
    pub description: String,
}
