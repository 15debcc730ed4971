//! Price helpers using decimal arithmetic.
//!
//! Prices are in Indian rupees and carried as [`Decimal`] end to end; the
//! API sends them as JSON numbers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rupee sign used for display.
pub const RUPEE: char = '₹';

/// Percentage saved by buying at `discounted` instead of `price`.
///
/// Rounded half away from zero to a whole percent. Returns 0 when there is
/// no saving or the price is not positive.
///
/// ```
/// use rust_decimal::Decimal;
/// use stay_young_core::discount_percentage;
///
/// assert_eq!(discount_percentage(Decimal::from(1000), Decimal::from(750)), 25);
/// assert_eq!(discount_percentage(Decimal::from(500), Decimal::from(500)), 0);
/// ```
#[must_use]
pub fn discount_percentage(price: Decimal, discounted: Decimal) -> u32 {
    if price <= Decimal::ZERO || discounted >= price {
        return 0;
    }

    ((price - discounted) / price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Format an amount for display, e.g. `₹1299` or `₹12.50`.
#[must_use]
pub fn format_rupees(amount: Decimal) -> String {
    let amount = amount.normalize();
    if amount.fract().is_zero() {
        format!("{RUPEE}{}", amount.trunc())
    } else {
        format!("{RUPEE}{:.2}", amount)
    }
}
