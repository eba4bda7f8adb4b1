//! # Reporting
//!
//! Read-only aggregations over the order history for the admin console.
//!
//! ```text
//! Order history ──┬──► sales_within_window(24h, now) ──► $ in trailing window
//!                 │
//!                 └──► top_selling(limit) ──────────────► [(name, units)]
//!
//! Catalog ─────────────► out_of_stock ──────────────────► [names]
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Item, Order};
use crate::MAX_SALES_WINDOW_HOURS;

/// One row of the top-selling table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopSeller {
    pub name: String,
    pub units: u64,
}

/// Everything the admin report shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesReport {
    pub window_hours: i64,
    pub window_sales_cents: i64,
    pub window_order_count: usize,
    pub total_order_count: usize,
    pub top_sellers: Vec<TopSeller>,
    pub out_of_stock: Vec<String>,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

impl SalesReport {
    /// Builds the report from the current history and catalog.
    pub fn build(
        orders: &[Order],
        items: &[Item],
        window: Duration,
        top_limit: usize,
        now: DateTime<Utc>,
    ) -> Self {
        SalesReport {
            window_hours: window.num_hours(),
            window_sales_cents: sales_within_window(orders, window, now).cents(),
            window_order_count: orders
                .iter()
                .filter(|order| in_window(order, window, now))
                .count(),
            total_order_count: orders.len(),
            top_sellers: top_selling(orders, Some(top_limit)),
            out_of_stock: items
                .iter()
                .filter(|item| !item.in_stock())
                .map(|item| item.name.clone())
                .collect(),
            generated_at: now,
        }
    }

    pub fn window_sales(&self) -> Money {
        Money::from_cents(self.window_sales_cents)
    }
}

/// Builds a trailing window of `hours`.
///
/// ## Errors
/// `OutOfRange` unless `1 <= hours <= MAX_SALES_WINDOW_HOURS`.
///
/// ## Example
/// ```rust
/// use storefront_core::reporting::sales_window;
///
/// assert_eq!(sales_window(24).unwrap().num_hours(), 24);
/// assert!(sales_window(0).is_err());
/// assert!(sales_window(i64::MAX).is_err());
/// ```
pub fn sales_window(hours: i64) -> CoreResult<Duration> {
    let out_of_range = || ValidationError::OutOfRange {
        field: "sales window hours".to_string(),
        min: 1,
        max: MAX_SALES_WINDOW_HOURS,
    };
    if !(1..=MAX_SALES_WINDOW_HOURS).contains(&hours) {
        return Err(out_of_range().into());
    }
    Duration::try_hours(hours).ok_or_else(|| out_of_range().into())
}

fn in_window(order: &Order, window: Duration, now: DateTime<Utc>) -> bool {
    let after_start = match now.checked_sub_signed(window) {
        Some(start) => order.placed_at >= start,
        None => true,
    };
    after_start && order.placed_at <= now
}

/// Sums order totals placed within `[now - window, now]`.
///
/// Both ends are inclusive. Orders stamped after `now` are ignored.
pub fn sales_within_window(orders: &[Order], window: Duration, now: DateTime<Utc>) -> Money {
    orders
        .iter()
        .filter(|order| in_window(order, window, now))
        .map(Order::total)
        .sum()
}

/// Counts units sold per item name across all orders.
///
/// Every cart line is one unit. Results are ranked by units, most first;
/// ties are ordered by name so the output is deterministic.
pub fn top_selling(orders: &[Order], limit: Option<usize>) -> Vec<TopSeller> {
    let mut units: HashMap<&str, u64> = HashMap::new();
    for line in orders.iter().flat_map(|order| order.lines.iter()) {
        *units.entry(line.name.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<TopSeller> = units
        .into_iter()
        .map(|(name, units)| TopSeller {
            name: name.to_string(),
            units,
        })
        .collect();
    ranked.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

// =============================================================================
// Unit Tests
// =============================================================================
