//! # Validation Module
//!
//! Turns raw admin and shopper input into typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (apps/storefront)                                      │
//! │  ├── Splits the line into arguments                                    │
//! │  └── Hands every value over as text                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── ItemDraft ──validate()──► NewItem                                 │
//! │  └── parse_price / parse_quantity / parse_item_id                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores                                                       │
//! │  └── Only ever see typed values (Money, u32, ItemId)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{parse_price, ItemDraft};
//!
//! assert_eq!(parse_price("29.99").unwrap().cents(), 2999);
//!
//! let draft = ItemDraft {
//!     name: "Lux".to_string(),
//!     category: Some("Soap".to_string()),
//!     price: "15".to_string(),
//!     quantity: "10".to_string(),
//!     discount_applicable: false,
//! };
//! let new_item = draft.validate().unwrap();
//! assert_eq!(new_item.quantity, 10);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::ItemId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_CATEGORY_LEN: usize = 50;
const MAX_QUERY_LEN: usize = 100;
const DEFAULT_CATEGORY: &str = "General";

/// Highest accepted item price, in whole currency units.
///
/// Keeps `price × u32::MAX` units inside `i64` cents, so no cart or order
/// sum can overflow.
pub const MAX_PRICE_UNITS: i64 = 1_000_000;

// =============================================================================
// Item Drafts
// =============================================================================

/// Raw "add item" form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemDraft {
    /// Required.
    pub name: String,
    /// Optional; blank or missing becomes "General".
    pub category: Option<String>,
    /// Decimal text, at most two fractional digits.
    pub price: String,
    /// Whole number of units.
    pub quantity: String,
    pub discount_applicable: bool,
}

/// A validated item, ready for admission into the catalog.
///
/// The catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: u32,
    pub discount_applicable: bool,
}

impl ItemDraft {
    /// Parses and validates every field.
    ///
    /// ## Errors
    /// - `Validation(Required)` for a blank name
    /// - `InvalidNumericInput` when price or quantity is not a number
    /// - `Validation(OutOfRange)` for negative price or quantity
    pub fn validate(&self) -> CoreResult<NewItem> {
        let name = validate_item_name(&self.name)?;
        let category = validate_category(self.category.as_deref())?;
        let price = parse_price(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(NewItem {
            name,
            category,
            price,
            quantity,
            discount_applicable: self.discount_applicable,
        })
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an optional category, falling back to "General".
pub fn validate_category(category: Option<&str>) -> ValidationResult<String> {
    let category = category.map(str::trim).unwrap_or_default();

    if category.is_empty() {
        return Ok(DEFAULT_CATEGORY.to_string());
    }

    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(category.to_string())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a coupon code and returns it trimmed.
///
/// Matching is exact; `promo10` is not `PROMO10`.
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a price typed as decimal text into Money.
///
/// ## Rules
/// - Digits with an optional `.` and at most two fractional digits
/// - `"25"`, `"25.5"`, `"25.50"` and `".5"` are accepted
/// - A leading `-` or anything above `MAX_PRICE_UNITS` is a range error,
///   anything else non-numeric is `InvalidNumericInput`
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_price;
///
/// assert_eq!(parse_price("25").unwrap().cents(), 2500);
/// assert_eq!(parse_price("25.5").unwrap().cents(), 2550);
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("1.999").is_err());
/// assert!(parse_price("1000000.01").is_err());
/// ```
pub fn parse_price(input: &str) -> CoreResult<Money> {
    let text = input.trim();
    let out_of_range = || -> CoreError {
        ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_UNITS,
        }
        .into()
    };

    if let Some(rest) = text.strip_prefix('-') {
        if parse_unsigned_cents(rest).is_some() {
            return Err(out_of_range());
        }
    }

    // Digits that overflow i64 are still a number, just far too large.
    let cents = match parse_unsigned_cents(text) {
        Some(cents) => cents,
        None if is_decimal_text(text) => return Err(out_of_range()),
        None => return Err(CoreError::invalid_number("price", input)),
    };
    if cents > MAX_PRICE_UNITS * 100 {
        return Err(out_of_range());
    }
    Ok(Money::from_cents(cents))
}

/// Digits with at most one `.` and at most two fractional digits.
fn is_decimal_text(text: &str) -> bool {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    !(whole.is_empty() && fraction.is_empty())
        && fraction.len() <= 2
        && all_digits(whole)
        && all_digits(fraction)
}

/// Parses `"12"`, `"12.3"`, `"12.34"` or `".5"` into cents.
fn parse_unsigned_cents(text: &str) -> Option<i64> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2 {
        return None;
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(fraction)
}

/// Parses a stock quantity.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 10 ").unwrap(), 10);
/// assert!(parse_quantity("ten").is_err());
/// assert!(parse_quantity("-1").is_err());
/// ```
pub fn parse_quantity(input: &str) -> CoreResult<u32> {
    let text = input.trim();

    match text.parse::<i64>() {
        Ok(value) if value < 0 || value > u32::MAX as i64 => Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: u32::MAX as i64,
        }
        .into()),
        Ok(value) => Ok(value as u32),
        Err(_) => Err(CoreError::invalid_number("quantity", input)),
    }
}

/// Parses a restock delta.
///
/// Signs are kept: the catalog store is the one that rejects `delta <= 0`.
pub fn parse_restock_delta(input: &str) -> CoreResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::invalid_number("restock quantity", input))
}

/// Parses an item id.
pub fn parse_item_id(input: &str) -> CoreResult<ItemId> {
    input
        .trim()
        .parse::<u64>()
        .map(ItemId)
        .map_err(|_| CoreError::invalid_number("item id", input))
}

// =============================================================================
// Unit Tests
// =============================================================================
