//! # Order Recorder
//!
//! Append-only order history. Orders are never edited or removed once
//! recorded; reporting reads the whole history each time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use storefront_core::reporting::{self, SalesReport, TopSeller};
use storefront_core::{Item, Money, Order};

/// Repository for completed orders.
#[derive(Debug, Clone, Default)]
pub struct OrderRepository {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl OrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an order to the history.
    pub fn record(&self, order: Order) {
        info!(
            order_id = %order.id,
            customer = %order.customer,
            lines = order.lines.len(),
            total = %order.total(),
            "Order recorded"
        );
        self.lock().push(order);
    }

    /// Full history, oldest first.
    pub fn list(&self) -> Vec<Order> {
        self.lock().clone()
    }

    /// Orders placed by one customer, oldest first.
    pub fn orders_for(&self, customer: &str) -> Vec<Order> {
        self.lock()
            .iter()
            .filter(|order| order.customer == customer)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of order totals placed in `[now - window, now]`.
    pub fn sales_within_window(&self, window: Duration, now: DateTime<Utc>) -> Money {
        reporting::sales_within_window(&self.lock(), window, now)
    }

    /// Best sellers by units, most first. `None` returns every item sold.
    pub fn top_selling(&self, limit: Option<usize>) -> Vec<TopSeller> {
        reporting::top_selling(&self.lock(), limit)
    }

    /// Names of the best sellers, most first.
    pub fn top_selling_names(&self, limit: Option<usize>) -> Vec<String> {
        self.top_selling(limit)
            .into_iter()
            .map(|seller| seller.name)
            .collect()
    }

    /// Builds the admin report against a catalog snapshot.
    pub fn report(
        &self,
        items: &[Item],
        window: Duration,
        top_limit: usize,
        now: DateTime<Utc>,
    ) -> SalesReport {
        SalesReport::build(&self.lock(), items, window, top_limit, now)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartLine, ItemId};

    fn order(customer: &str, names: &[&str], placed_at: DateTime<Utc>) -> Order {
        let lines: Vec<CartLine> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let item = Item {
                    id: ItemId(i as u64 + 1),
                    name: name.to_string(),
                    category: "Soap".to_string(),
                    price_cents: 1000,
                    quantity: 1,
                    discount_applicable: false,
                };
                CartLine::from_item(&item, placed_at)
            })
            .collect();
        let subtotal: Money = lines.iter().map(CartLine::final_price).sum();
        Order::new(customer, lines, subtotal, subtotal, placed_at)
    }

    #[test]
    fn test_record_and_filter_by_customer() {
        let repo = OrderRepository::new();
        let now = Utc::now();
        repo.record(order("John", &["Lux"], now));
        repo.record(order("Mark", &["Dove", "Lux"], now));
        repo.record(order("John", &["Dove"], now));

        assert_eq!(repo.len(), 3);
        assert_eq!(repo.orders_for("John").len(), 2);
        assert!(repo.orders_for("admin").is_empty());
    }

    #[test]
    fn test_window_and_top_sellers() {
        let repo = OrderRepository::new();
        let now = Utc::now();
        repo.record(order("John", &["Lux", "Dove"], now - Duration::hours(1)));
        repo.record(order("Mark", &["Lux"], now - Duration::hours(48)));

        assert_eq!(
            repo.sales_within_window(Duration::hours(24), now).cents(),
            2000
        );
        assert_eq!(repo.top_selling_names(None), vec!["Lux", "Dove"]);
        assert_eq!(repo.top_selling_names(Some(1)), vec!["Lux"]);
    }

    #[test]
    fn test_empty_history() {
        let repo = OrderRepository::new();
        assert!(repo.is_empty());
        assert!(repo
            .sales_within_window(Duration::hours(24), Utc::now())
            .is_zero());
        assert!(repo.top_selling(None).is_empty());
    }
}
