//! # Cart Engine
//!
//! One customer's cart, wired to the shared stores.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Engine Operations                             │
//! │                                                                         │
//! │  Shop Action          CartEngine              Side Effects              │
//! │  ───────────          ──────────              ────────────              │
//! │                                                                         │
//! │  add 1 ─────────────► add_to_cart(1) ───────► catalog qty - 1          │
//! │                                               line appended             │
//! │                                                                         │
//! │  remove 0 ──────────► remove_from_cart(0) ──► catalog qty + 1          │
//! │                                               line dropped              │
//! │                                                                         │
//! │  coupon PROMO10 ────► apply_coupon ─────────► coupon uses - 1          │
//! │                                               total reduced             │
//! │                                                                         │
//! │  checkout ──────────► checkout("John") ─────► order recorded           │
//! │                                               cart emptied              │
//! │                                                                         │
//! │  logout ────────────► abandon() ────────────► every unit returned      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is owned by a single session and takes `&mut self`; only the
//! stores behind it are shared.

use chrono::Utc;
use tracing::{debug, info, warn};

use storefront_core::{Cart, CartLine, CartPhase, CoreError, CoreResult, ItemId, Money, Order};

use crate::repository::coupons::Redeemed;
use crate::reservation::InventoryReservation;
use crate::Storefront;

/// A session's cart plus handles to the stores it changes.
#[derive(Debug)]
pub struct CartEngine {
    store: Storefront,
    reservation: InventoryReservation,
    cart: Cart,
}

impl CartEngine {
    /// Creates an engine with an empty cart.
    pub fn new(store: Storefront) -> Self {
        let reservation = InventoryReservation::new(store.catalog());
        CartEngine {
            store,
            reservation,
            cart: Cart::new(),
        }
    }

    /// Reserves one unit of `item_id` and appends it as a new line.
    ///
    /// The total resets to the sum of line prices, so a coupon discount
    /// taken earlier no longer applies.
    ///
    /// ## Errors
    /// `ItemNotFound` / `OutOfStock` from the catalog; the cart is unchanged
    pub fn add_to_cart(&mut self, item_id: ItemId) -> CoreResult<CartLine> {
        let item = self.reservation.reserve(item_id)?;
        let line = CartLine::from_item(&item, Utc::now());
        self.cart.push_line(line.clone());

        debug!(
            item_id = %item_id,
            final_price = %line.final_price(),
            lines = self.cart.len(),
            total = %self.cart.total(),
            "Line added"
        );
        Ok(line)
    }

    /// Removes the line at `index` and returns its unit to stock.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn remove_from_cart(&mut self, index: usize) -> Option<CartLine> {
        let line = self.cart.remove_line(index)?;
        self.reservation.release(line.item_id);

        debug!(
            item_id = %line.item_id,
            index,
            lines = self.cart.len(),
            total = %self.cart.total(),
            "Line removed"
        );
        Some(line)
    }

    /// Redeems a coupon against the current total.
    ///
    /// ## Errors
    /// `InvalidCoupon` for unknown, exhausted or blank codes. The total and
    /// the coupon are unchanged.
    pub fn apply_coupon(&mut self, code: &str) -> CoreResult<Redeemed> {
        let redeemed = self.store.coupons().redeem(code, self.cart.total())?;
        self.cart
            .record_redemption(redeemed.code.clone(), redeemed.rate, redeemed.discount);

        debug!(
            code = %redeemed.code,
            discount = %redeemed.discount,
            total = %self.cart.total(),
            "Coupon applied"
        );
        Ok(redeemed)
    }

    /// Turns the cart into an order and empties it.
    ///
    /// Stock is not touched: every unit was reserved when its line was added.
    ///
    /// ## Errors
    /// `EmptyCart` when there are no lines.
    pub fn checkout(&mut self, customer: &str) -> CoreResult<Order> {
        if self.cart.is_empty() {
            warn!(customer = %customer, "Checkout with empty cart");
            return Err(CoreError::EmptyCart);
        }

        let snapshot = self.cart.take();
        let order = Order::new(
            customer,
            snapshot.lines,
            snapshot.subtotal,
            snapshot.total,
            Utc::now(),
        );
        self.store.orders().record(order.clone());

        info!(
            order_id = %order.id,
            customer = %customer,
            total = %order.total(),
            "Checkout complete"
        );
        Ok(order)
    }

    /// Returns every reserved unit to the catalog and clears the cart.
    ///
    /// Called when a session ends without checking out. Coupon uses already
    /// consumed are not refunded. Returns the number of units handed back.
    pub fn abandon(&mut self) -> usize {
        if self.cart.is_empty() {
            return 0;
        }

        let snapshot = self.cart.take();
        let returned = snapshot
            .lines
            .iter()
            .filter(|line| self.reservation.release(line.item_id))
            .count();

        info!(
            lines = snapshot.lines.len(),
            returned,
            "Cart abandoned"
        );
        returned
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn discount(&self) -> Money {
        self.cart.discount()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn state(&self) -> CartPhase {
        self.cart.phase()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Coupon, Item};

    fn store() -> Storefront {
        let store = Storefront::new();
        store
            .catalog()
            .insert(Item {
                id: ItemId(1),
                name: "Pantene".to_string(),
                category: "Conditioner".to_string(),
                price_cents: 3000,
                quantity: 1,
                discount_applicable: true,
            })
            .unwrap();
        store
            .catalog()
            .insert(Item {
                id: ItemId(2),
                name: "Lux".to_string(),
                category: "Soap".to_string(),
                price_cents: 10000,
                quantity: 5,
                discount_applicable: false,
            })
            .unwrap();
        store.coupons().insert(Coupon {
            code: "PROMO10".to_string(),
            discount_percent: 10,
            remaining_uses: 2,
        })
        .unwrap();
        store
    }

    #[test]
    fn test_add_locks_in_discounted_price() {
        let store = store();
        let mut engine = CartEngine::new(store.clone());

        let line = engine.add_to_cart(ItemId(1)).unwrap();
        assert_eq!(line.final_price_cents, 2700);
        assert_eq!(engine.total().cents(), 2700);
        assert_eq!(store.catalog().get(ItemId(1)).unwrap().quantity, 0);

        assert!(matches!(
            engine.add_to_cart(ItemId(1)),
            Err(CoreError::OutOfStock { .. })
        ));
        assert_eq!(engine.lines().len(), 1);
    }

    #[test]
    fn test_unknown_item() {
        let mut engine = CartEngine::new(store());
        assert_eq!(
            engine.add_to_cart(ItemId(42)).unwrap_err(),
            CoreError::ItemNotFound(ItemId(42))
        );
        assert_eq!(engine.state(), CartPhase::Empty);
    }

    #[test]
    fn test_remove_restores_stock() {
        let store = store();
        let mut engine = CartEngine::new(store.clone());

        engine.add_to_cart(ItemId(2)).unwrap();
        assert_eq!(store.catalog().get(ItemId(2)).unwrap().quantity, 4);

        assert!(engine.remove_from_cart(5).is_none());
        let removed = engine.remove_from_cart(0).unwrap();
        assert_eq!(removed.item_id, ItemId(2));
        assert_eq!(store.catalog().get(ItemId(2)).unwrap().quantity, 5);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_coupon_compounds() {
        let store = store();
        let mut engine = CartEngine::new(store.clone());
        engine.add_to_cart(ItemId(2)).unwrap();

        let first = engine.apply_coupon("PROMO10").unwrap();
        assert_eq!(first.remaining_uses, 1);
        assert_eq!(engine.total().cents(), 9000);

        engine.apply_coupon("PROMO10").unwrap();
        assert_eq!(engine.total().cents(), 8100);

        assert!(matches!(
            engine.apply_coupon("PROMO10"),
            Err(CoreError::InvalidCoupon(_))
        ));
        assert_eq!(engine.total().cents(), 8100);
        assert_eq!(engine.discount().cents(), 1900);
    }

    #[test]
    fn test_checkout_records_and_resets() {
        let store = store();
        let mut engine = CartEngine::new(store.clone());
        engine.add_to_cart(ItemId(1)).unwrap();
        engine.add_to_cart(ItemId(2)).unwrap();

        let order = engine.checkout("John").unwrap();
        assert_eq!(order.total_cost, "127.00");
        assert_eq!(order.lines.len(), 2);
        assert_eq!(store.orders().len(), 1);

        assert!(engine.is_empty());
        assert!(engine.total().is_zero());
        assert_eq!(engine.checkout("John").unwrap_err(), CoreError::EmptyCart);
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn test_abandon_returns_units() {
        let store = store();
        let mut engine = CartEngine::new(store.clone());
        engine.add_to_cart(ItemId(2)).unwrap();
        engine.add_to_cart(ItemId(2)).unwrap();
        assert_eq!(store.catalog().get(ItemId(2)).unwrap().quantity, 3);

        assert_eq!(engine.abandon(), 2);
        assert_eq!(store.catalog().get(ItemId(2)).unwrap().quantity, 5);
        assert!(engine.is_empty());
        assert_eq!(engine.abandon(), 0);
    }

    #[test]
    fn test_adding_after_coupon_resets_total() {
        let store = store();
        let mut engine = CartEngine::new(store.clone());
        engine.add_to_cart(ItemId(2)).unwrap();
        engine.apply_coupon("PROMO10").unwrap();
        assert_eq!(engine.total().cents(), 9000);

        engine.add_to_cart(ItemId(2)).unwrap();
        assert_eq!(engine.total().cents(), 20000);
        assert!(engine.discount().is_zero());
        assert!(engine.cart().redemptions().is_empty());
        assert_eq!(store.coupons().get("PROMO10").unwrap().remaining_uses, 1);
    }

    #[test]
    fn test_cart_takes_every_unit_in_stock() {
        let store = store();
        store.catalog().restock(ItemId(2), 495).unwrap();
        let mut engine = CartEngine::new(store.clone());

        for _ in 0..500 {
            engine.add_to_cart(ItemId(2)).unwrap();
        }
        assert_eq!(engine.lines().len(), 500);
        assert!(matches!(
            engine.add_to_cart(ItemId(2)),
            Err(CoreError::OutOfStock { .. })
        ));
    }
}
