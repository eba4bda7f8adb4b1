//! # Shop Commands
//!
//! Customer-side commands: browse, cart, coupons, checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_to_cart ──► remove_from_cart ──► apply_coupon ──► checkout         │
//! │       │                 │                   │              │            │
//! │   stock - 1         stock + 1          uses - 1       order recorded    │
//! │                                                        signed out       │
//! │                                                        view: ThankYou   │
//! │                                                                         │
//! │  close_receipt: ThankYou ──► Login                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use storefront_core::{CartLine, CartPhase, Item, ItemId, Order, Redemption, Role};
use storefront_store::CartEngine;

use crate::error::ApiError;
use crate::routing::View;
use crate::state::Session;

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub redemptions: Vec<Redemption>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub state: CartPhase,
}

impl From<&CartEngine> for CartResponse {
    fn from(engine: &CartEngine) -> Self {
        CartResponse {
            lines: engine.lines().to_vec(),
            redemptions: engine.cart().redemptions().to_vec(),
            subtotal_cents: engine.subtotal().cents(),
            discount_cents: engine.discount().cents(),
            total_cents: engine.total().cents(),
            state: engine.state(),
        }
    }
}

/// Outcome of a successful coupon application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub code: String,
    pub discount_cents: i64,
    pub remaining_uses: u32,
    pub cart: CartResponse,
}

/// Catalog as customers see it, in catalog order.
pub fn browse(session: &Session) -> Result<Vec<Item>, ApiError> {
    session.require(Role::Customer)?;
    Ok(session.store().catalog().list())
}

pub fn get_cart(session: &Session) -> Result<CartResponse, ApiError> {
    let cart = session.cart()?;
    Ok(CartResponse::from(cart))
}

/// Adds one unit of an item to the cart.
pub fn add_to_cart(session: &mut Session, item_id: u64) -> Result<CartResponse, ApiError> {
    debug!(item_id, "add_to_cart command");
    let (_, cart) = session.cart_mut()?;
    cart.add_to_cart(ItemId(item_id))?;
    Ok(CartResponse::from(&*cart))
}

/// Removes the line at a 1-based position, as shown in the cart table.
pub fn remove_from_cart(session: &mut Session, position: usize) -> Result<CartResponse, ApiError> {
    debug!(position, "remove_from_cart command");
    let (_, cart) = session.cart_mut()?;

    position
        .checked_sub(1)
        .and_then(|index| cart.remove_from_cart(index))
        .ok_or_else(|| ApiError::not_found("Cart line", &position.to_string()))?;

    Ok(CartResponse::from(&*cart))
}

pub fn apply_coupon(session: &mut Session, code: &str) -> Result<CouponResponse, ApiError> {
    debug!(code = %code, "apply_coupon command");
    let (_, cart) = session.cart_mut()?;
    let redeemed = cart.apply_coupon(code)?;

    Ok(CouponResponse {
        code: redeemed.code,
        discount_cents: redeemed.discount.cents(),
        remaining_uses: redeemed.remaining_uses,
        cart: CartResponse::from(&*cart),
    })
}

/// Places the order, ends the session and moves to the thank-you view.
pub fn checkout(session: &mut Session) -> Result<Order, ApiError> {
    debug!("checkout command");
    let (customer, cart) = session.cart_mut()?;
    let customer = customer.to_string();
    let order = cart.checkout(&customer)?;

    session.complete_checkout(order.clone());
    Ok(order)
}

/// Leaves the thank-you view for Login.
pub fn close_receipt(session: &mut Session) -> Result<View, ApiError> {
    if session.view() != View::ThankYou {
        return Err(ApiError::validation("No order to close"));
    }
    Ok(session.close_receipt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_store::Storefront;

    fn customer() -> Session {
        let store = Storefront::seeded().unwrap();
        let user = store.users().authenticate("John", "john").unwrap();
        let mut session = Session::new(store);
        session.sign_in(user);
        session
    }

    #[test]
    fn test_add_and_remove_by_position() {
        let mut session = customer();
        add_to_cart(&mut session, 1).unwrap();
        let cart = add_to_cart(&mut session, 4).unwrap();
        assert_eq!(cart.total_cents, 3750);

        let err = remove_from_cart(&mut session, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        let err = remove_from_cart(&mut session, 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let cart = remove_from_cart(&mut session, 1).unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].name, "Lux");
    }

    #[test]
    fn test_checkout_ends_session_on_thank_you() {
        let mut session = customer();
        add_to_cart(&mut session, 2).unwrap();
        apply_coupon(&mut session, "PROMO10").unwrap();

        let order = checkout(&mut session).unwrap();
        assert_eq!(order.customer, "John");
        assert_eq!(order.total_cost, "24.30");
        assert!(session.user().is_none());
        assert_eq!(session.view(), View::ThankYou);
        assert_eq!(session.last_order(), Some(&order));
        assert_eq!(session.store().catalog().get(ItemId(2)).unwrap().quantity, 9);

        assert_eq!(checkout(&mut session).unwrap_err().code, ErrorCode::AccessDenied);
        assert_eq!(close_receipt(&mut session).unwrap(), View::Login);
        assert!(session.last_order().is_none());
        assert_eq!(
            close_receipt(&mut session).unwrap_err().code,
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_admin_cannot_shop() {
        let store = Storefront::seeded().unwrap();
        let admin = store.users().authenticate("admin", "admin").unwrap();
        let mut session = Session::new(store);
        session.sign_in(admin);

        assert_eq!(
            add_to_cart(&mut session, 1).unwrap_err().code,
            ErrorCode::AccessDenied
        );
        assert_eq!(browse(&session).unwrap_err().code, ErrorCode::AccessDenied);
    }
}
