//! # API Error Type
//!
//! Unified error type for application commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Shell line                   Rust Backend                              │
//! │  ──────────                   ────────────                              │
//! │                                                                         │
//! │  add 4                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Wrong role? ──── ApiError::access_denied ──────────────┐       │  │
//! │  │         │                                                │       │  │
//! │  │         ▼                                                ▼       │  │
//! │  │  Store says no? ── CoreError::OutOfStock ── From ──► ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The shell prints the message as a one-line notification (or the      │
//! │  whole error as JSON) and keeps reading input.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::CoreError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "Out of stock: Dove (item 5)"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown item, coupon or cart line
    NotFound,

    /// Item has no stock left
    OutOfStock,

    /// Coupon unknown or used up
    InvalidCoupon,

    /// Checkout with nothing in the cart
    EmptyCart,

    /// Input could not be parsed or failed a rule
    ValidationError,

    /// Username/password rejected
    AuthFailure,

    /// Signed out, or signed in with the wrong role
    AccessDenied,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::AccessDenied, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ItemNotFound(_) => ErrorCode::NotFound,
            CoreError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CoreError::InvalidCoupon(_) => ErrorCode::InvalidCoupon,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::AuthFailure => ErrorCode::AuthFailure,
            CoreError::InvalidNumericInput { .. } | CoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
