//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    CartLine     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │──►│  item_id        │──►│  id (UUID)      │       │
//! │  │  name, category │   │  name snapshot  │   │  customer       │       │
//! │  │  price_cents    │   │  final_price    │   │  lines          │       │
//! │  │  quantity       │   │  (frozen)       │   │  total_cost     │       │
//! │  │  discount flag  │   └─────────────────┘   │  placed_at      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │     Coupon      │   │   User / Role   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  code           │   │  Admin          │       │
//! │  │  1000 = 10%     │   │  percent, uses  │   │  Customer       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Cart lines and orders copy the item fields they need at the moment the
//! line is created. Later catalog edits never change a cart or an order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::ITEM_DISCOUNT_BPS;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. Coupons are whole percentages today, but the
/// item discount and coupon math share one integer representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage (10 → 10%).
    #[inline]
    pub const fn from_percent(percent: u8) -> Self {
        DiscountRate(percent as u32 * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// Catalog item identifier.
///
/// Issued by the catalog store; never reused within one process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sellable item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Unique identifier within the catalog.
    pub id: ItemId,

    /// Display name shown in both consoles.
    pub name: String,

    /// Free-form category ("Soap", "Conditioner").
    pub category: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Units in stock. Unsigned, so it can never go below zero.
    pub quantity: u32,

    /// Whether the 10% item discount applies when added to a cart.
    pub discount_applicable: bool,
}

impl Item {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Price a cart line gets when this item is added right now.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Item, ItemId};
    ///
    /// let item = Item {
    ///     id: ItemId(2),
    ///     name: "Pantene".to_string(),
    ///     category: "Conditioner".to_string(),
    ///     price_cents: 3000,
    ///     quantity: 10,
    ///     discount_applicable: true,
    /// };
    /// assert_eq!(item.final_price().cents(), 2700);
    /// ```
    pub fn final_price(&self) -> Money {
        if self.discount_applicable {
            self.price()
                .apply_discount(DiscountRate::from_bps(ITEM_DISCOUNT_BPS))
        } else {
            self.price()
        }
    }

    /// Checks whether at least one unit can be reserved.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount coupon.
///
/// ## Lifecycle
/// ```text
/// remaining_uses: 2 ──redeem──► 1 ──redeem──► 0 ──redeem──► InvalidCoupon
///                                              │
///                                              └── kept in the store, unusable
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    /// Code the customer types in.
    pub code: String,

    /// Whole-percentage discount, 0 to 100.
    pub discount_percent: u8,

    /// How many more redemptions are allowed.
    pub remaining_uses: u32,
}

impl Coupon {
    /// Returns the discount as a rate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_percent(self.discount_percent)
    }

    /// Checks if the coupon can still be redeemed.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.remaining_uses > 0
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One unit of an item placed in a cart.
///
/// The price is locked in when the line is created and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Catalog item this unit was reserved from.
    pub item_id: ItemId,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Item category at time of adding (frozen).
    pub category: String,

    /// Catalog price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Whether the item discount was applied.
    pub discount_applied: bool,

    /// Price charged for this line in cents.
    pub final_price_cents: i64,

    /// When this line was added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Freezes an item into a cart line.
    pub fn from_item(item: &Item, added_at: DateTime<Utc>) -> Self {
        CartLine {
            item_id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            unit_price_cents: item.price_cents,
            discount_applied: item.discount_applicable,
            final_price_cents: item.final_price().cents(),
            added_at,
        }
    }

    /// Returns the locked-in final price.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_cents(self.final_price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed checkout. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Username of the customer who placed the order.
    pub customer: String,

    /// Cart lines at checkout (frozen).
    pub lines: Vec<CartLine>,

    /// Sum of line final prices.
    pub subtotal_cents: i64,

    /// Total removed by coupons.
    pub discount_cents: i64,

    /// Amount charged.
    pub total_cents: i64,

    /// `total_cents` formatted with two decimal places ("90.00").
    pub total_cost: String,

    /// When the order was placed.
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order snapshot with a fresh id.
    pub fn new(
        customer: impl Into<String>,
        lines: Vec<CartLine>,
        subtotal: Money,
        total: Money,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            customer: customer.into(),
            lines,
            subtotal_cents: subtotal.cents(),
            discount_cents: (subtotal - total).cents(),
            total_cents: total.cents(),
            total_cost: total.to_decimal_string(),
            placed_at,
        }
    }

    /// Returns the amount charged as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Users
// =============================================================================

/// What a signed-in user is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    /// Inventory console: catalog management and reports.
    Admin,
    /// Shopping flow: cart, coupons, checkout.
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Customer => write!(f, "Customer"),
        }
    }
}

/// A directory entry.
///
/// Passwords are stored and compared as plain text. This directory is a
/// demo fixture, not an authentication system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price_cents: i64, discount_applicable: bool) -> Item {
        Item {
            id: ItemId(1),
            name: "Dove".to_string(),
            category: "Soap".to_string(),
            price_cents,
            quantity: 1,
            discount_applicable,
        }
    }

    #[test]
    fn test_discount_rate() {
        let rate = DiscountRate::from_percent(10);
        assert_eq!(rate.bps(), 1000);
        assert_eq!(rate.to_string(), "10%");
        assert_eq!(DiscountRate::from_bps(825).to_string(), "8.25%");
    }

    #[test]
    fn test_final_price() {
        assert_eq!(item(3000, true).final_price().cents(), 2700);
        assert_eq!(item(1500, false).final_price().cents(), 1500);
    }

    #[test]
    fn test_cart_line_freezes_item() {
        let mut source = item(3000, true);
        let line = CartLine::from_item(&source, Utc::now());

        source.price_cents = 9999;
        source.name = "Renamed".to_string();

        assert_eq!(line.final_price_cents, 2700);
        assert_eq!(line.unit_price_cents, 3000);
        assert_eq!(line.name, "Dove");
        assert!(line.discount_applied);
    }

    #[test]
    fn test_coupon_usable() {
        let mut coupon = Coupon {
            code: "PROMO10".to_string(),
            discount_percent: 10,
            remaining_uses: 1,
        };
        assert!(coupon.is_usable());
        coupon.remaining_uses = 0;
        assert!(!coupon.is_usable());
    }

    #[test]
    fn test_order_snapshot() {
        let line = CartLine::from_item(&item(3000, true), Utc::now());
        let order = Order::new(
            "John",
            vec![line.clone(), line],
            Money::from_cents(5400),
            Money::from_cents(4860),
            Utc::now(),
        );

        assert_eq!(order.total_cost, "48.60");
        assert_eq!(order.discount_cents, 540);
        assert_eq!(order.lines.len(), 2);
        assert!(Uuid::parse_str(&order.id).is_ok());
    }

    #[test]
    fn test_user_password_not_serialized() {
        let user = User {
            id: 101,
            username: "John".to_string(),
            password: "john".to_string(),
            role: Role::Customer,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"role\":\"Customer\""));
    }
}
