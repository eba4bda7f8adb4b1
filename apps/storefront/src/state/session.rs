//! # Session State
//!
//! Everything that belongs to one signed-in user: who they are, which view
//! they are on, their cart (customers) or table state (admins).
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Login ──sign_in(admin)────► AdminConsole  (query, pending delete)      │
//! │    │                                                                    │
//! │    └──sign_in(customer)────► Shop ──checkout──► ThankYou ──► Login      │
//! │                               (CartEngine)      (signed out)            │
//! │                                                                         │
//! │  sign_out: abandons the cart (stock returned) and goes back to Login    │
//! │  checkout ends the session too; only the receipt is kept                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use storefront_core::catalog_view::CatalogQuery;
use storefront_core::{ItemId, Order, Role, User};
use storefront_store::{CartEngine, Storefront};

use crate::error::ApiError;
use crate::routing::{self, View};

/// Delete confirmation flow for the admin table.
///
/// ```text
/// Idle ──request_delete(id)──► Pending(id) ──confirm──► Idle (item removed)
///                                   │
///                                   └──cancel──► Idle
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(ItemId),
}

/// Admin console table state.
#[derive(Debug, Clone, Default)]
pub struct AdminConsoleState {
    pub query: CatalogQuery,
    pub delete: DeleteConfirmation,
}

/// One user's session.
#[derive(Debug)]
pub struct Session {
    store: Storefront,
    user: Option<User>,
    view: View,
    cart: Option<CartEngine>,
    admin: AdminConsoleState,
    last_order: Option<Order>,
}

impl Session {
    /// Creates a signed-out session on the login view.
    pub fn new(store: Storefront) -> Self {
        Session {
            store,
            user: None,
            view: View::Login,
            cart: None,
            admin: AdminConsoleState::default(),
            last_order: None,
        }
    }

    pub fn store(&self) -> &Storefront {
        &self.store
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Moves to `requested`, or to Login if the user may not see it.
    ///
    /// Returns the view actually shown.
    pub fn navigate(&mut self, requested: View) -> View {
        self.view = routing::resolve(requested, self.user.as_ref());
        self.view
    }

    /// Starts a session for `user`, ending any previous one first.
    pub fn sign_in(&mut self, user: User) -> View {
        self.sign_out();

        if user.role == Role::Customer {
            self.cart = Some(self.store.cart_engine());
        }
        self.view = View::home_for(user.role);
        self.user = Some(user);
        self.view
    }

    /// Ends the session. Returns the number of cart units handed back.
    pub fn sign_out(&mut self) -> usize {
        let returned = self.cart.take().map_or(0, |mut cart| cart.abandon());
        if let Some(user) = self.user.take() {
            info!(username = %user.username, returned, "User signed out");
        }
        self.admin = AdminConsoleState::default();
        self.last_order = None;
        self.view = View::Login;
        returned
    }

    /// Returns the user if they hold `role`.
    pub fn require(&self, role: Role) -> Result<&User, ApiError> {
        match &self.user {
            Some(user) if user.role == role => Ok(user),
            Some(user) => Err(ApiError::access_denied(format!(
                "{} accounts cannot do that",
                user.role
            ))),
            None => Err(ApiError::access_denied("Please sign in first")),
        }
    }

    /// Customer cart, if a customer is signed in.
    pub fn cart(&self) -> Result<&CartEngine, ApiError> {
        self.require(Role::Customer)?;
        self.cart
            .as_ref()
            .ok_or_else(|| ApiError::access_denied("No cart for this session"))
    }

    /// Customer cart plus username, for commands that change it.
    pub fn cart_mut(&mut self) -> Result<(&str, &mut CartEngine), ApiError> {
        self.require(Role::Customer)?;
        match (&self.user, &mut self.cart) {
            (Some(user), Some(cart)) => Ok((user.username.as_str(), cart)),
            _ => Err(ApiError::access_denied("No cart for this session")),
        }
    }

    /// Admin table state, if an admin is signed in.
    pub fn admin_mut(&mut self) -> Result<&mut AdminConsoleState, ApiError> {
        self.require(Role::Admin)?;
        Ok(&mut self.admin)
    }

    pub fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    /// Ends the session after a successful checkout and shows the receipt.
    ///
    /// The cart is already drained, so nothing goes back to stock.
    pub(crate) fn complete_checkout(&mut self, order: Order) -> View {
        self.sign_out();
        self.last_order = Some(order);
        self.view = View::ThankYou;
        self.view
    }

    /// Leaves the thank-you view for Login and forgets the receipt.
    pub fn close_receipt(&mut self) -> View {
        self.last_order = None;
        self.view = View::Login;
        self.view
    }
}
