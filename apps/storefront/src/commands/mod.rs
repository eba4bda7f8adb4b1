//! # Commands Module
//!
//! Every operation the shell can perform.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── auth.rs     ◄─── login, logout, navigation
//! ├── admin.rs    ◄─── item table, add/delete/restock, coupons, report
//! └── shop.rs     ◄─── browse, cart, coupon, checkout
//! ```
//!
//! ## How Commands Work
//! Each command takes the session (and config when it needs it), checks
//! the signed-in role and returns `Result<T, ApiError>` where `T` is
//! serializable. The shell decides whether `T` becomes a table or JSON.

pub mod admin;
pub mod auth;
pub mod shop;
