//! Derived report series: monthly profit/margin and inventory history

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{InventoryTransaction, Sale};

/// One month of revenue, cost, profit, and margin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProfit {
    pub month: NaiveDate,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    pub margin_percent: Decimal,
}

/// One month of reconstructed inventory level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyLevel {
    pub month: NaiveDate,
    pub level: i64,
}

/// Group sales by calendar month and compute profit and margin per month.
/// Only months with at least one sale appear, in chronological order. A
/// month with zero revenue reports a margin of 0 rather than dividing by
/// zero.
pub fn monthly_profit_margin(sales: &[Sale]) -> Vec<MonthlyProfit> {
    let mut by_month: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for sale in sales {
        let quantity = Decimal::from(sale.quantity);
        let entry = by_month
            .entry(month_of(sale.date_sold))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += quantity * sale.sale_price;
        entry.1 += quantity * sale.acquisition_cost;
    }

    by_month
        .into_iter()
        .map(|(month, (revenue, cost))| {
            let profit = revenue - cost;
            let margin_percent = if revenue.is_zero() {
                Decimal::ZERO
            } else {
                profit / revenue * Decimal::from(100)
            };
            MonthlyProfit {
                month,
                revenue,
                cost,
                profit,
                margin_percent,
            }
        })
        .collect()
}

/// Reconstruct monthly inventory levels by walking backward from the current
/// on-hand total through the logged quantity changes.
///
/// Transactions are bucketed into a contiguous month range (months with no
/// activity contribute a zero delta). Deltas are consumed newest-first from
/// the current total, and each step's running total is reported against the
/// months oldest-first, so the final month's level equals the current total
/// minus every logged change.
pub fn monthly_inventory_levels(
    current_total: i64,
    transactions: &[InventoryTransaction],
) -> Vec<MonthlyLevel> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let mut deltas: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for transaction in transactions {
        *deltas
            .entry(month_of(transaction.transaction_date))
            .or_insert(0) += i64::from(transaction.qty_change);
    }

    let first = *deltas.keys().next().unwrap();
    let last = *deltas.keys().next_back().unwrap();
    let mut months = Vec::new();
    let mut month = first;
    while month <= last {
        months.push(month);
        month = next_month(month);
    }

    let mut running = current_total;
    let mut levels = Vec::with_capacity(months.len());
    for (idx, &m) in months.iter().enumerate() {
        let newest_unconsumed = months[months.len() - 1 - idx];
        running -= deltas.get(&newest_unconsumed).copied().unwrap_or(0);
        levels.push(MonthlyLevel {
            month: m,
            level: running,
        });
    }
    levels
}

fn month_of(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

fn next_month(month: NaiveDate) -> NaiveDate {
    if month.month() == 12 {
        NaiveDate::from_ymd_opt(month.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(month.year(), month.month() + 1, 1).unwrap()
    }
}
