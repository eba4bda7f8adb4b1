//! # storefront-store: Shared State for the Storefront
//!
//! Owns everything that changes while the program runs: catalog stock,
//! coupon uses, order history. Pure math comes from `storefront-core`; this
//! crate adds locking, stock reservation and logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  Shell command (add 1)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌─────────────────┐   │   │
//! │  │   │  CartEngine  │──►│  Reservation  │──►│  Repositories   │   │   │
//! │  │   │ (per session)│   │ one unit/line │   │ catalog coupons │   │   │
//! │  │   └──────────────┘   └───────────────┘   │ orders  users   │   │   │
//! │  │                                          └─────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Process memory (lost on exit)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`Storefront`] handle
//! - [`repository`] - Catalog, coupon, order and user repositories
//! - [`reservation`] - One-unit stock reservation
//! - [`cart_engine`] - Per-session cart operations
//! - [`seed`] - Sample data

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_engine;
pub mod repository;
pub mod reservation;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_engine::CartEngine;
pub use reservation::InventoryReservation;
pub use store::Storefront;

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::coupons::{CouponRepository, Redeemed};
pub use repository::orders::OrderRepository;
pub use repository::users::UserDirectory;
