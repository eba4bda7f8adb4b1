//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  app errors (apps/storefront)                                          │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → notification           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. Every failure is reported to the caller that
//! triggered it and the session stays usable.

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No item with this id exists in the catalog.
    ///
    /// ## When This Occurs
    /// - Admin restocks or deletes an id that was already deleted
    /// - Customer adds an id that is not in the catalog
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The item has no stock left to reserve.
    ///
    /// ## User Workflow
    /// ```text
    /// add 1
    ///   │
    ///   ▼
    /// reserve: quantity == 0
    ///   │
    ///   ▼
    /// OutOfStock { item_id: 1, name: "Dove" }
    ///   │
    ///   ▼
    /// UI shows: "Out of stock: Dove"
    /// ```
    #[error("Out of stock: {name} (item {item_id})")]
    OutOfStock { item_id: ItemId, name: String },

    /// Coupon code is unknown or has no remaining uses.
    #[error("Invalid or expired coupon: {0}")]
    InvalidCoupon(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// A numeric field could not be parsed.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumericInput { field: String, value: String },

    /// Username/password pair did not match the directory.
    #[error("Invalid credentials")]
    AuthFailure,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidNumericInput`].
    pub fn invalid_number(field: &str, value: &str) -> Self {
        CoreError::InvalidNumericInput {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before any store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., an item id seeded twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
