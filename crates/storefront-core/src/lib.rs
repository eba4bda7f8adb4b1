//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains all pricing,
//! validation, cart math and reporting as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (terminal shell)                   │   │
//! │  │    Login ──► Admin Console / Shop ──► Thank You                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-store (shared state)                 │   │
//! │  │    Catalog, Coupons, Orders, Directory, CartEngine              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌────────┐ │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ validation│ │reporting│ │   │
//! │  │   │  Item   │ │  Money  │ │  Cart   │ │ ItemDraft │ │ sales  │ │   │
//! │  │   │  Order  │ │Discount │ │CartLine │ │  parsing  │ │ top-N  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └───────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO SHARED STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Coupon, CartLine, Order, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Parsing of admin input into typed values
//! - [`cart`] - Pure cart: lines, coupon redemptions, totals
//! - [`catalog_view`] - Admin search and sort over items
//! - [`reporting`] - Aggregations over the order history
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::types::DiscountRate;
//!
//! let price = Money::from_cents(3000); // $30.00
//! let final_price = price.apply_discount(DiscountRate::from_percent(10));
//! assert_eq!(final_price.cents(), 2700);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog_view;
pub mod error;
pub mod money;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartPhase, CheckoutSnapshot, Redemption};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Discount applied to items flagged `discount_applicable`, in basis points.
///
/// 1000 bps = 10% off the catalog price, locked in when the line is added.
pub const ITEM_DISCOUNT_BPS: u32 = 1000;

/// Default trailing window for the admin sales figure.
pub const DEFAULT_SALES_WINDOW_HOURS: i64 = 24;

/// Longest trailing window the sales report accepts (ten years).
pub const MAX_SALES_WINDOW_HOURS: i64 = 24 * 366 * 10;

/// Default number of entries in the top-selling report.
pub const DEFAULT_TOP_SELLING_LIMIT: usize = 5;
