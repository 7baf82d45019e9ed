//! # Pricing Calculator
//!
//! Pure derivation of the checkout figures from the cart's raw total and the
//! discount-code flag. No side effects, no persistence — recomputed on demand.
//!
//! ## Pricing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Breakdown                                   │
//! │                                                                         │
//! │  raw_total  = Σ unit_price × quantity                                   │
//! │                                                                         │
//! │  discount   = 10% of raw      (only when raw > $20.000)                 │
//! │             + 5%  of raw      (only when a valid code is active)        │
//! │                                                                         │
//! │  shipping   = $0 when raw > $25.000, else flat $3.000                   │
//! │                                                                         │
//! │  tax        = 19% VAT on (raw − discount)                               │
//! │                                                                         │
//! │  subtotal   = raw + discount  (display figure: raw plus savings)        │
//! │                                                                         │
//! │  grand      = raw             (charged amount; tax and shipping are     │
//! │                                informational line items, see below)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The charged total deliberately does NOT fold shipping and tax in: the
//! checkout flow confirms the raw total and shows the rest as a breakdown.
//! Changing that requires product sign-off, not a code fix.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Pricing Constants
// =============================================================================

/// Raw total above which the 10% volume discount kicks in (exclusive).
pub const VOLUME_DISCOUNT_THRESHOLD: Money = Money::from_pesos(20_000);

/// Volume discount rate: 10%.
pub const VOLUME_DISCOUNT_BPS: u32 = 1_000;

/// Promotional-code discount rate: 5%.
pub const CODE_DISCOUNT_BPS: u32 = 500;

/// Raw total above which shipping is free (exclusive).
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_pesos(25_000);

/// Flat shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING: Money = Money::from_pesos(3_000);

/// Chilean VAT: 19%.
pub const VAT_BPS: u32 = 1_900;

/// Accepted promotional codes. Matched case-insensitively; static by design,
/// substitutable later without changing the calculator's interface.
pub const DISCOUNT_CODES: [&str; 4] = ["DESCUENTO10", "BIENVENIDO", "PROMO5", "NUEVO"];

// =============================================================================
// Calculator Functions
// =============================================================================

/// Total discount for a raw total.
///
/// ## Components
/// - 10% of raw, only when `raw > $20.000`
/// - 5% of raw, only when a valid code is active
///
/// Both components round half-up independently, then sum. Codes never stack:
/// the 5% component applies at most once no matter how many codes were tried.
pub fn discount(raw_total: Money, discount_applied: bool) -> Money {
    let mut total = Money::zero();
    if raw_total > VOLUME_DISCOUNT_THRESHOLD {
        total += raw_total.percentage(VOLUME_DISCOUNT_BPS);
    }
    if discount_applied {
        total += raw_total.percentage(CODE_DISCOUNT_BPS);
    }
    total
}

/// Shipping cost: free above the threshold, otherwise a flat fee.
pub fn shipping_cost(raw_total: Money) -> Money {
    if raw_total > FREE_SHIPPING_THRESHOLD {
        Money::zero()
    } else {
        FLAT_SHIPPING
    }
}

/// 19% VAT, computed on the discounted base `(raw − discount)`.
pub fn tax(raw_total: Money, discount_applied: bool) -> Money {
    (raw_total - discount(raw_total, discount_applied)).percentage(VAT_BPS)
}

/// The "before discount" display figure: raw plus savings.
///
/// Additive by source policy — the UI presents the subtotal as what the
/// order would have cost without the discount.
pub fn display_subtotal(raw_total: Money, discount_applied: bool) -> Money {
    raw_total + discount(raw_total, discount_applied)
}

/// The charged amount. Equals the raw total: tax and shipping are shown as
/// an informational breakdown, not added in.
pub fn grand_total(raw_total: Money) -> Money {
    raw_total
}

// =============================================================================
// Quote
// =============================================================================

/// The full checkout breakdown for one raw total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingQuote {
    /// Σ unit_price × quantity over all lines.
    pub raw_total: Money,
    /// Combined volume + code discount.
    pub discount: Money,
    /// Flat fee or free.
    pub shipping: Money,
    /// 19% VAT on the discounted base.
    pub tax: Money,
    /// Display subtotal: raw + discount.
    pub subtotal: Money,
    /// Charged amount: the raw total.
    pub grand_total: Money,
}

/// Builds the full breakdown in one pass.
pub fn quote(raw_total: Money, discount_applied: bool) -> PricingQuote {
    PricingQuote {
        raw_total,
        discount: discount(raw_total, discount_applied),
        shipping: shipping_cost(raw_total),
        tax: tax(raw_total, discount_applied),
        subtotal: display_subtotal(raw_total, discount_applied),
        grand_total: grand_total(raw_total),
    }
}

// =============================================================================
// Discount Code Validation
// =============================================================================

/// Validates a promotional code against the allow-list.
///
/// ## Behavior
/// - Input is trimmed and matched case-insensitively
/// - Empty input: [`CoreError::EmptyDiscountCode`]
/// - Unknown code: [`CoreError::InvalidDiscountCode`] with the input echoed
///
/// ## Returns
/// The canonical (uppercase) form of the code.
pub fn validate_code(input: &str) -> CoreResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyDiscountCode);
    }

    let canonical = trimmed.to_uppercase();
    if DISCOUNT_CODES.contains(&canonical.as_str()) {
        Ok(canonical)
    } else {
        Err(CoreError::InvalidDiscountCode(trimmed.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pesos: i64) -> Money {
        Money::from_pesos(pesos)
    }

    #[test]
    fn test_discount_threshold_boundary() {
        // Exactly at the threshold: no volume discount
        assert_eq!(discount(m(20_000), false), Money::zero());
        // One peso over: 10% of 20.001 = 2000.1 → 2.000
        assert_eq!(discount(m(20_001), false), m(2_000));
    }

    #[test]
    fn test_discount_components_sum() {
        // 10% + 5%, each rounded independently
        let expected = m(20_001).percentage(1_000) + m(20_001).percentage(500);
        assert_eq!(discount(m(20_001), true), expected);
        assert_eq!(discount(m(20_001), true), m(2_000) + m(1_000));
    }

    #[test]
    fn test_code_discount_below_threshold() {
        // Only the 5% component applies
        assert_eq!(discount(m(10_000), true), m(500));
        assert_eq!(discount(m(10_000), false), Money::zero());
    }

    #[test]
    fn test_shipping_boundary() {
        assert_eq!(shipping_cost(m(25_000)), m(3_000));
        assert_eq!(shipping_cost(m(25_001)), Money::zero());
        assert_eq!(shipping_cost(Money::zero()), m(3_000));
    }

    #[test]
    fn test_tax_on_discounted_base() {
        for raw in [0, 99, 15_000, 20_000, 20_001, 25_001, 1_000_000] {
            for applied in [false, true] {
                let base = m(raw) - discount(m(raw), applied);
                assert_eq!(
                    tax(m(raw), applied),
                    base.percentage(VAT_BPS),
                    "raw={raw} applied={applied}"
                );
            }
        }
    }

    #[test]
    fn test_display_subtotal_is_additive() {
        assert_eq!(display_subtotal(m(30_000), false), m(33_000));
        assert_eq!(display_subtotal(m(10_000), false), m(10_000));
    }

    #[test]
    fn test_grand_total_is_raw_total() {
        // Charged amount stays the raw total; tax/shipping are informational
        let q = quote(m(30_000), true);
        assert_eq!(q.grand_total, m(30_000));
        assert_ne!(q.grand_total, q.raw_total + q.shipping + q.tax);
    }

    #[test]
    fn test_quote_bundles_all_figures() {
        let q = quote(m(20_001), true);
        assert_eq!(q.raw_total, m(20_001));
        assert_eq!(q.discount, m(3_000));
        assert_eq!(q.shipping, m(3_000));
        assert_eq!(q.tax, (m(20_001) - m(3_000)).percentage(VAT_BPS));
        assert_eq!(q.subtotal, m(23_001));
        assert_eq!(q.grand_total, m(20_001));
    }

    #[test]
    fn test_validate_code_case_insensitive() {
        assert_eq!(validate_code("descuento10").unwrap(), "DESCUENTO10");
        assert_eq!(validate_code("  Promo5  ").unwrap(), "PROMO5");
        assert_eq!(validate_code("NUEVO").unwrap(), "NUEVO");
    }

    #[test]
    fn test_validate_code_rejects_unknown() {
        assert_eq!(
            validate_code("FAKE123"),
            Err(CoreError::InvalidDiscountCode("FAKE123".into()))
        );
    }

    #[test]
    fn test_validate_code_rejects_empty() {
        assert_eq!(validate_code(""), Err(CoreError::EmptyDiscountCode));
        assert_eq!(validate_code("   "), Err(CoreError::EmptyDiscountCode));
    }
}
