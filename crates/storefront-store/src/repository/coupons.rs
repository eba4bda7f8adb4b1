//! # Coupon Repository
//!
//! Coupon book keyed by code. Codes are matched exactly (case-sensitive)
//! once surrounding whitespace is trimmed.
//!
//! A redemption checks usability, decrements `remaining_uses` and computes
//! the discount in one lock acquisition. Exhausted coupons stay in the book
//! so the admin overview can still show them.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{info, warn};

use storefront_core::{CoreError, CoreResult, Coupon, DiscountRate, Money, ValidationError};

/// Result of a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redeemed {
    pub code: String,
    pub rate: DiscountRate,
    /// Amount taken off the total the coupon was applied to.
    pub discount: Money,
    pub remaining_uses: u32,
}

/// Repository for coupons.
#[derive(Debug, Clone, Default)]
pub struct CouponRepository {
    coupons: Arc<Mutex<BTreeMap<String, Coupon>>>,
}

impl CouponRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Coupon>> {
        self.coupons.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or replaces a coupon.
    ///
    /// ## Errors
    /// `Validation` if the code is blank or the percentage is above 100.
    /// The book is unchanged in that case.
    pub fn insert(&self, coupon: Coupon) -> CoreResult<()> {
        if coupon.code.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "coupon code".to_string(),
            }
            .into());
        }
        if coupon.discount_percent > 100 {
            warn!(code = %coupon.code, percent = coupon.discount_percent, "Coupon rejected");
            return Err(ValidationError::OutOfRange {
                field: "discount percent".to_string(),
                min: 0,
                max: 100,
            }
            .into());
        }

        info!(
            code = %coupon.code,
            percent = coupon.discount_percent,
            uses = coupon.remaining_uses,
            "Coupon registered"
        );
        self.lock().insert(coupon.code.clone(), coupon);
        Ok(())
    }

    /// Redeems `code` against `current_total`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Coupon, Money};
    /// use storefront_store::CouponRepository;
    ///
    /// let coupons = CouponRepository::new();
    /// coupons.insert(Coupon {
    ///     code: "PROMO10".to_string(),
    ///     discount_percent: 10,
    ///     remaining_uses: 1,
    /// }).unwrap();
    ///
    /// let redeemed = coupons.redeem("PROMO10", Money::from_cents(10000)).unwrap();
    /// assert_eq!(redeemed.discount.cents(), 1000);
    /// assert!(coupons.redeem("PROMO10", Money::from_cents(10000)).is_err());
    /// ```
    ///
    /// ## Errors
    /// `InvalidCoupon` if the code is unknown or has no uses left. Nothing
    /// changes in that case.
    pub fn redeem(&self, code: &str, current_total: Money) -> CoreResult<Redeemed> {
        let code = code.trim();
        let mut coupons = self.lock();
        let coupon = match coupons.get_mut(code) {
            Some(coupon) if coupon.is_usable() => coupon,
            _ => {
                warn!(code = %code, "Invalid or expired coupon");
                return Err(CoreError::InvalidCoupon(code.to_string()));
            }
        };

        coupon.remaining_uses -= 1;
        let rate = coupon.rate();
        let discount = current_total.discount_amount(rate);

        info!(
            code = %code,
            discount = %discount,
            remaining = coupon.remaining_uses,
            "Coupon redeemed"
        );

        Ok(Redeemed {
            code: coupon.code.clone(),
            rate,
            discount,
            remaining_uses: coupon.remaining_uses,
        })
    }

    pub fn get(&self, code: &str) -> Option<Coupon> {
        self.lock().get(code.trim()).cloned()
    }

    /// All coupons ordered by code.
    pub fn list(&self) -> Vec<Coupon> {
        self.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with(code: &str, percent: u8, uses: u32) -> CouponRepository {
        let repo = CouponRepository::new();
        repo.insert(Coupon {
            code: code.to_string(),
            discount_percent: percent,
            remaining_uses: uses,
        })
        .unwrap();
        repo
    }

    #[test]
    fn test_redeem_decrements_uses() {
        let repo = repo_with("PROMO10", 10, 2);

        let redeemed = repo.redeem("PROMO10", Money::from_cents(5000)).unwrap();
        assert_eq!(redeemed.discount.cents(), 500);
        assert_eq!(redeemed.remaining_uses, 1);
        assert_eq!(repo.get("PROMO10").unwrap().remaining_uses, 1);
    }

    #[test]
    fn test_exhausted_coupon_is_kept_but_rejected() {
        let repo = repo_with("ONCE", 10, 1);
        repo.redeem("ONCE", Money::from_cents(100)).unwrap();

        assert!(matches!(
            repo.redeem("ONCE", Money::from_cents(100)),
            Err(CoreError::InvalidCoupon(code)) if code == "ONCE"
        ));
        assert_eq!(repo.get("ONCE").unwrap().remaining_uses, 0);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        let repo = repo_with("PROMO10", 10, 5);
        assert!(repo.redeem("promo10", Money::from_cents(100)).is_err());
        assert_eq!(repo.get("PROMO10").unwrap().remaining_uses, 5);

        assert!(repo.redeem("  PROMO10 ", Money::from_cents(100)).is_ok());
        assert_eq!(repo.get("PROMO10").unwrap().remaining_uses, 4);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        let repo = repo_with("PROMO10", 10, 1);
        // 10% of 12.35 = 1.235 → 1.24
        let redeemed = repo.redeem("PROMO10", Money::from_cents(1235)).unwrap();
        assert_eq!(redeemed.discount.cents(), 124);
    }

    #[test]
    fn test_list_sorted_by_code() {
        let repo = repo_with("ZED", 5, 1);
        repo.insert(Coupon {
            code: "ALPHA".to_string(),
            discount_percent: 20,
            remaining_uses: 3,
        })
        .unwrap();
        let codes: Vec<_> = repo.list().into_iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["ALPHA", "ZED"]);
    }

    #[test]
    fn test_insert_rejects_bad_coupons() {
        let repo = CouponRepository::new();
        let err = repo
            .insert(Coupon {
                code: "HUGE".to_string(),
                discount_percent: 150,
                remaining_uses: 1,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { max: 100, .. })
        ));

        assert!(repo
            .insert(Coupon {
                code: "  ".to_string(),
                discount_percent: 10,
                remaining_uses: 1,
            })
            .is_err());
        assert!(repo.is_empty());

        repo.insert(Coupon {
            code: "FREE".to_string(),
            discount_percent: 100,
            remaining_uses: 1,
        })
        .unwrap();
        let redeemed = repo.redeem("FREE", Money::from_cents(2500)).unwrap();
        assert_eq!(redeemed.discount.cents(), 2500);
    }
}
