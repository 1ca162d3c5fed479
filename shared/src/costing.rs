//! Inventory cost arithmetic

use rust_decimal::Decimal;

/// Quantity-weighted average unit cost of an existing lot merged with an
/// incoming addition, rounded to cents.
pub fn weighted_average_cost(
    existing_quantity: i32,
    existing_unit_cost: Decimal,
    added_quantity: i32,
    added_unit_cost: Decimal,
) -> Decimal {
    let total_quantity = Decimal::from(existing_quantity) + Decimal::from(added_quantity);
    if total_quantity.is_zero() {
        return Decimal::ZERO;
    }

    let total_value = Decimal::from(existing_quantity) * existing_unit_cost
        + Decimal::from(added_quantity) * added_unit_cost;

    (total_value / total_quantity).round_dp(2)
}
