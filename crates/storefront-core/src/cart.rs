//! # Cart
//!
//! The pure shopping cart: an ordered list of one-unit lines plus the coupons
//! redeemed against it. Stock reservation and coupon bookkeeping live in
//! `storefront-store`; this type only does the math.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐   push_line    ┌────────────┐   take (checkout)          │
//! │   │  Empty  │──────────────►│ Populated  │────────────────┐           │
//! │   └─────────┘               └────────────┘                 │           │
//! │        ▲                      │        ▲                    │           │
//! │        │   remove last line   │        │ push / remove      │           │
//! │        └──────────────────────┘        └────────            │           │
//! │        ▲                                                     │           │
//! │        └─────────────────────────────────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! The total is recomputed from line prices whenever a line is added or
//! removed, which drops any coupon discount taken so far. A coupon discounts
//! the running total, so a second 10% coupon takes 10% of the
//! already-discounted total (compounding).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, DiscountRate};

/// A coupon redemption recorded against a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Redemption {
    pub code: String,
    pub rate: DiscountRate,
}

/// Observable cart state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CartPhase {
    /// No lines.
    Empty,
    /// At least one line.
    Populated,
}

/// Everything checkout needs from a drained cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSnapshot {
    pub lines: Vec<CartLine>,
    pub subtotal: Money,
    pub total: Money,
}

/// The shopping cart.
///
/// ## Invariants
/// - `total == subtotal` right after any line change
/// - `redemptions` only lists coupons whose discount is still in `total`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
    redemptions: Vec<Redemption>,
    total: Money,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            redemptions: Vec::new(),
            total: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Coupons redeemed against this cart, oldest first.
    pub fn redemptions(&self) -> &[Redemption] {
        &self.redemptions
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn phase(&self) -> CartPhase {
        if self.lines.is_empty() {
            CartPhase::Empty
        } else {
            CartPhase::Populated
        }
    }

    /// Sum of all line final prices.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::final_price).sum()
    }

    /// Amount the customer would pay right now.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Total taken off by coupons.
    pub fn discount(&self) -> Money {
        self.subtotal() - self.total
    }

    /// Appends a line and recomputes the total.
    pub fn push_line(&mut self, line: CartLine) {
        self.lines.push(line);
        self.recompute();
    }

    /// Removes the line at `index`.
    ///
    /// Returns `None` and leaves the cart untouched when `index` is out of
    /// range.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        if index >= self.lines.len() {
            return None;
        }
        let line = self.lines.remove(index);
        self.recompute();
        Some(line)
    }

    /// Records a coupon redemption and subtracts its discount.
    ///
    /// `discount` is what the coupon store computed against [`Cart::total`].
    pub fn record_redemption(&mut self, code: impl Into<String>, rate: DiscountRate, discount: Money) {
        self.redemptions.push(Redemption {
            code: code.into(),
            rate,
        });
        self.total -= discount;
    }

    /// Drains the cart for checkout and resets it to empty.
    pub fn take(&mut self) -> CheckoutSnapshot {
        let snapshot = CheckoutSnapshot {
            subtotal: self.subtotal(),
            total: self.total,
            lines: std::mem::take(&mut self.lines),
        };
        self.clear();
        snapshot
    }

    /// Clears all lines and redemptions.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.redemptions.clear();
        self.total = Money::zero();
        self.created_at = Utc::now();
    }

    fn recompute(&mut self) {
        self.redemptions.clear();
        self.total = self.subtotal();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
