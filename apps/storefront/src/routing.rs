//! # Routing
//!
//! Decides which view a session is allowed to see.
//!
//! ```text
//! ┌──────────────┬─────────────────┬─────────────────┬─────────────────┐
//! │ requested    │ signed out      │ Admin           │ Customer        │
//! ├──────────────┼─────────────────┼─────────────────┼─────────────────┤
//! │ Login        │ Login           │ Login           │ Login           │
//! │ AdminConsole │ Login           │ AdminConsole    │ Login           │
//! │ Shop         │ Login           │ Login           │ Shop            │
//! │ ThankYou     │ Login           │ Login           │ ThankYou        │
//! └──────────────┴─────────────────┴─────────────────┴─────────────────┘
//! ```

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

use storefront_core::{Role, User};

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    #[value(name = "admin")]
    AdminConsole,
    Shop,
    ThankYou,
}

impl View {
    /// Landing view after signing in.
    pub fn home_for(role: Role) -> View {
        match role {
            Role::Admin => View::AdminConsole,
            Role::Customer => View::Shop,
        }
    }

    /// Role a view requires, if any.
    pub fn required_role(self) -> Option<Role> {
        match self {
            View::Login => None,
            View::AdminConsole => Some(Role::Admin),
            View::Shop | View::ThankYou => Some(Role::Customer),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Login => write!(f, "login"),
            View::AdminConsole => write!(f, "admin"),
            View::Shop => write!(f, "shop"),
            View::ThankYou => write!(f, "thank-you"),
        }
    }
}

/// Resolves a requested view against the signed-in user.
///
/// Unauthenticated or role-mismatched requests land on [`View::Login`].
pub fn resolve(requested: View, user: Option<&User>) -> View {
    match (requested.required_role(), user) {
        (None, _) => requested,
        (Some(role), Some(user)) if user.role == role => requested,
        _ => View::Login,
    }
}
