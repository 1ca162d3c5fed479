//! Marketplace listing models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An item listed for sale on one marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub website: Website,
    pub url: String,
    pub status: ListingStatus,
    pub unit_price: Decimal,
}

impl Listing {
    /// Apply a sale of `quantity` units. A listing that sells out flips to
    /// sold before the decrement is stored.
    pub fn apply_sale(&mut self, quantity: i32) {
        if quantity == self.quantity {
            self.status = ListingStatus::Sold;
        }
        self.quantity -= quantity;
    }
}

/// Marketplace a listing lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Website {
    Etsy,
    Amazon,
    Ebay,
}

impl Website {
    pub fn as_str(&self) -> &'static str {
        match self {
            Website::Etsy => "etsy",
            Website::Amazon => "amazon",
            Website::Ebay => "ebay",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "etsy" => Some(Website::Etsy),
            "amazon" => Some(Website::Amazon),
            "ebay" => Some(Website::Ebay),
            _ => None,
        }
    }
}

/// Lifecycle state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Sold,
    Inactive,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Sold => "sold",
            ListingStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ListingStatus::Active),
            "sold" => Some(ListingStatus::Sold),
            "inactive" => Some(ListingStatus::Inactive),
            _ => None,
        }
    }
}
