//! # Storefront Handle
//!
//! The one object that owns all shared state. The application creates it at
//! startup and hands clones to every session.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main                                                                   │
//! │   │                                                                     │
//! │   ├── Storefront::seeded()      (or ::new() for an empty store)         │
//! │   │                                                                     │
//! │   ├── session A ── store.clone() ──► CartEngine ──┐                     │
//! │   │                                                ├──► same catalog    │
//! │   └── session B ── store.clone() ──► CartEngine ──┘                     │
//! │                                                                         │
//! │  Process exit drops everything. Nothing is persisted.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use storefront_core::reporting::SalesReport;
use storefront_core::{CoreResult, User};

use crate::cart_engine::CartEngine;
use crate::repository::catalog::CatalogRepository;
use crate::repository::coupons::CouponRepository;
use crate::repository::orders::OrderRepository;
use crate::repository::users::UserDirectory;
use crate::seed;

/// Shared handle to every repository.
///
/// ## Usage
/// ```rust
/// use storefront_core::ItemId;
/// use storefront_store::Storefront;
///
/// let store = Storefront::seeded().unwrap();
/// let mut cart = store.cart_engine();
///
/// cart.add_to_cart(ItemId(1)).unwrap();
/// let order = cart.checkout("John").unwrap();
///
/// assert_eq!(order.total_cost, "22.50");
/// assert_eq!(store.orders().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Storefront {
    catalog: CatalogRepository,
    coupons: CouponRepository,
    orders: OrderRepository,
    users: UserDirectory,
}

impl Storefront {
    /// Creates an empty storefront with no items, coupons or users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty storefront with a fixed user list.
    pub fn with_users(users: Vec<User>) -> Self {
        Storefront {
            users: UserDirectory::new(users),
            ..Self::default()
        }
    }

    /// Creates a storefront loaded with the sample catalog, coupon and users.
    pub fn seeded() -> CoreResult<Self> {
        let store = Self::with_users(seed::sample_users());
        for item in seed::sample_items() {
            store.catalog.insert(item)?;
        }
        for coupon in seed::sample_coupons() {
            store.coupons.insert(coupon)?;
        }

        info!(
            items = store.catalog.len(),
            coupons = store.coupons.len(),
            users = store.users.len(),
            "Storefront seeded"
        );
        Ok(store)
    }

    pub fn catalog(&self) -> CatalogRepository {
        self.catalog.clone()
    }

    pub fn coupons(&self) -> CouponRepository {
        self.coupons.clone()
    }

    pub fn orders(&self) -> OrderRepository {
        self.orders.clone()
    }

    pub fn users(&self) -> UserDirectory {
        self.users.clone()
    }

    /// New cart engine bound to this storefront.
    pub fn cart_engine(&self) -> CartEngine {
        CartEngine::new(self.clone())
    }

    /// Admin report over the current history and catalog.
    pub fn sales_report(&self, window: Duration, top_limit: usize, now: DateTime<Utc>) -> SalesReport {
        let items = self.catalog.list();
        self.orders.report(&items, window, top_limit, now)
    }
}
