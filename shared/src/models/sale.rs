//! Sale models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded sale. `acquisition_cost` is the item's average inventory cost
/// at the moment of sale and is never re-derived, so profit reports always
/// use the cost that was current when the sale happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub sale_price: Decimal,
    pub acquisition_cost: Decimal,
    pub date_sold: NaiveDate,
}
