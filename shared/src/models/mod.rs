//! Domain models for the Stockroom platform

mod inventory;
mod item;
mod listing;
mod sale;

pub use inventory::*;
pub use item::*;
pub use listing::*;
pub use sale::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn round_trip<T>(value: &T)
    where
        T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let json = serde_json::to_string(value).unwrap();
        let back: T = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, value);
    }

    #[test]
    fn test_item_round_trip() {
        round_trip(&Item {
            item_id: 1,
            name: "Ceramic mug".to_string(),
            description: "Hand thrown stoneware mug".to_string(),
        });
    }

    #[test]
    fn test_inventory_lot_round_trip() {
        round_trip(&InventoryLot {
            inventory_id: 2,
            item_id: 1,
            quantity: 15,
            location: "Shelf A1".to_string(),
            unit_cost: Decimal::new(600, 2),
        });
    }

    #[test]
    fn test_inventory_transaction_round_trip() {
        round_trip(&InventoryTransaction {
            transaction_id: 3,
            item_id: 1,
            inventory_id: 2,
            qty_change: -5,
            transaction_date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        });
    }

    #[test]
    fn test_listing_round_trip() {
        round_trip(&Listing {
            listing_id: 4,
            item_id: 1,
            quantity: 5,
            website: Website::Etsy,
            url: "https://www.etsy.com/listing/12345".to_string(),
            status: ListingStatus::Active,
            unit_price: Decimal::new(1050, 2),
        });
    }

    #[test]
    fn test_sale_round_trip() {
        round_trip(&Sale {
            sale_id: 5,
            item_id: 1,
            quantity: 2,
            sale_price: Decimal::new(1050, 2),
            acquisition_cost: Decimal::new(600, 2),
            date_sold: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        });
    }
}
