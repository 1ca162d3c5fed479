//! Listing and sale recording tests

use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{Listing, ListingStatus, Website};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_listing(quantity: i32) -> Listing {
    Listing {
        listing_id: 1,
        item_id: 1,
        quantity,
        website: Website::Etsy,
        url: "https://www.etsy.com/listing/12345".to_string(),
        status: ListingStatus::Active,
        unit_price: dec("10.50"),
    }
}

#[test]
fn test_sale_of_full_quantity_marks_sold() {
    let mut listing = sample_listing(5);
    listing.apply_sale(5);

    assert_eq!(listing.quantity, 0);
    assert_eq!(listing.status, ListingStatus::Sold);
}

#[test]
fn test_partial_sale_keeps_status() {
    let mut listing = sample_listing(5);
    listing.apply_sale(3);

    assert_eq!(listing.quantity, 2);
    assert_eq!(listing.status, ListingStatus::Active);
}

#[test]
fn test_consecutive_sales_flip_on_last_unit() {
    let mut listing = sample_listing(4);
    listing.apply_sale(3);
    assert_eq!(listing.status, ListingStatus::Active);

    listing.apply_sale(1);
    assert_eq!(listing.quantity, 0);
    assert_eq!(listing.status, ListingStatus::Sold);
}

#[test]
fn test_sale_does_not_touch_inactive_status_on_partial() {
    let mut listing = sample_listing(5);
    listing.status = ListingStatus::Inactive;
    listing.apply_sale(2);

    assert_eq!(listing.quantity, 3);
    assert_eq!(listing.status, ListingStatus::Inactive);
}

#[test]
fn test_website_string_mapping() {
    assert_eq!(Website::Etsy.as_str(), "etsy");
    assert_eq!(Website::Amazon.as_str(), "amazon");
    assert_eq!(Website::from_str("ebay"), Some(Website::Ebay));
    assert_eq!(Website::from_str("walmart"), None);
}

#[test]
fn test_listing_status_string_mapping() {
    assert_eq!(ListingStatus::Sold.as_str(), "sold");
    assert_eq!(ListingStatus::from_str("active"), Some(ListingStatus::Active));
    assert_eq!(
        ListingStatus::from_str("inactive"),
        Some(ListingStatus::Inactive)
    );
    assert_eq!(ListingStatus::from_str("archived"), None);
}
