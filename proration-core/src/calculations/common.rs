//! Common utility functions for proration calculations.
//!
//! This module provides the two rounding rules the worksheets rely on:
//! truncation to a yen unit and half-up rounding to whole yen.

use rust_decimal::{Decimal, RoundingStrategy};

/// Truncates a value down to a multiple of `unit`.
///
/// Computes `floor(value / unit) * unit`. Amounts are non-negative in
/// practice, so flooring and truncating toward zero agree. A zero `unit`,
/// or one so small the quotient does not fit, returns the value untouched.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use proration_core::calculations::common::floor_to_unit;
///
/// assert_eq!(floor_to_unit(dec!(12345678), dec!(1000)), dec!(12345000));
/// assert_eq!(floor_to_unit(dec!(1899.5), dec!(100)), dec!(1800));
/// assert_eq!(floor_to_unit(dec!(999), dec!(1000)), dec!(0));
/// ```
pub fn floor_to_unit(
    value: Decimal,
    unit: Decimal,
) -> Decimal {
    match value.checked_div(unit) {
        Some(quotient) => quotient.floor() * unit,
        None => value,
    }
}

/// Rounds a value to whole yen using half-up rounding.
///
/// Values at exactly .5 round away from zero, which for the non-negative
/// payments computed here is the same as rounding up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use proration_core::calculations::common::round_to_yen;
///
/// assert_eq!(round_to_yen(dec!(123.4)), dec!(123));
/// assert_eq!(round_to_yen(dec!(123.5)), dec!(124));
/// assert_eq!(round_to_yen(dec!(123.6)), dec!(124));
/// ```
pub fn round_to_yen(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // floor_to_unit tests
    // =========================================================================

    #[test]
    fn floor_to_unit_truncates_below_thousand() {
        let result = floor_to_unit(dec!(12345678), dec!(1000));

        assert_eq!(result, dec!(12345000));
    }

    #[test]
    fn floor_to_unit_keeps_exact_multiples() {
        let result = floor_to_unit(dec!(600000), dec!(1000));

        assert_eq!(result, dec!(600000));
    }

    #[test]
    fn floor_to_unit_handles_fractional_values() {
        let result = floor_to_unit(dec!(1849.5), dec!(100));

        assert_eq!(result, dec!(1800));
    }

    #[test]
    fn floor_to_unit_values_below_unit_become_zero() {
        let result = floor_to_unit(dec!(99.99), dec!(100));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn floor_to_unit_handles_zero() {
        let result = floor_to_unit(dec!(0), dec!(1000));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn floor_to_unit_zero_unit_is_identity() {
        let result = floor_to_unit(dec!(1234.5), dec!(0));

        assert_eq!(result, dec!(1234.5));
    }

    #[test]
    fn floor_to_unit_unrepresentable_quotient_is_identity() {
        let result = floor_to_unit(Decimal::MAX, dec!(0.1));

        assert_eq!(result, Decimal::MAX);
    }

    // =========================================================================
    // round_to_yen tests
    // =========================================================================

    #[test]
    fn round_to_yen_rounds_down_below_midpoint() {
        let result = round_to_yen(dec!(161589.49));

        assert_eq!(result, dec!(161589));
    }

    #[test]
    fn round_to_yen_rounds_up_at_midpoint() {
        let result = round_to_yen(dec!(161589.5));

        assert_eq!(result, dec!(161590));
    }

    #[test]
    fn round_to_yen_rounds_up_above_midpoint() {
        let result = round_to_yen(dec!(0.51));

        assert_eq!(result, dec!(1));
    }

    #[test]
    fn round_to_yen_preserves_whole_values() {
        let result = round_to_yen(dec!(324000));

        assert_eq!(result, dec!(324000));
    }
}
