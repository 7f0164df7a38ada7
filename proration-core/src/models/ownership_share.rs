//! Fractional ownership of a property, as entered on the valuation form.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::parse::parse_integer;

/// Denominator pre-filled on the valuation form.
pub const DEFAULT_DENOMINATOR: u64 = 10_000;

/// Fractional interest in a property, kept as entered (not reduced).
///
/// The denominator is never zero: a zero denominator is replaced by 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ShareParts")]
pub struct OwnershipShare {
    numerator: u64,
    denominator: u64,
}

#[derive(Deserialize)]
struct ShareParts {
    numerator: u64,
    denominator: u64,
}

impl From<ShareParts> for OwnershipShare {
    fn from(parts: ShareParts) -> Self {
        Self::new(parts.numerator, parts.denominator)
    }
}

impl OwnershipShare {
    /// Creates a share, substituting 1 for a zero denominator.
    pub fn new(
        numerator: u64,
        denominator: u64,
    ) -> Self {
        let denominator = if denominator == 0 {
            warn!(numerator, "ownership denominator is zero; using 1");
            1
        } else {
            denominator
        };
        Self {
            numerator,
            denominator,
        }
    }

    /// Builds a share from the two form fields.
    ///
    /// Unreadable or negative numerators become 0; unreadable, zero or
    /// negative denominators become 1.
    ///
    /// ```
    /// use proration_core::OwnershipShare;
    ///
    /// let share = OwnershipShare::from_text("10", "10,000");
    /// assert_eq!((share.numerator(), share.denominator()), (10, 10000));
    ///
    /// let share = OwnershipShare::from_text("", "0");
    /// assert_eq!((share.numerator(), share.denominator()), (0, 1));
    /// ```
    pub fn from_text(
        numerator: &str,
        denominator: &str,
    ) -> Self {
        let numerator = parse_integer(numerator)
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        let denominator = parse_integer(denominator)
            .and_then(|d| u64::try_from(d).ok())
            .unwrap_or(1);
        Self::new(numerator, denominator)
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// The share as a decimal number, e.g. 0.001 for 10/10000.
    pub fn ratio(&self) -> Decimal {
        Decimal::from(self.numerator) / Decimal::from(self.denominator)
    }

    /// Applies the share to a taxable base.
    ///
    /// Multiplies before dividing so shares such as 1/3 stay exact on bases
    /// divisible by the denominator. A product too large for `Decimal`
    /// falls back to dividing first, and saturates at [`Decimal::MAX`].
    pub fn apply(
        &self,
        base: Decimal,
    ) -> Decimal {
        let numerator = Decimal::from(self.numerator);
        let denominator = Decimal::from(self.denominator);

        match base.checked_mul(numerator) {
            Some(product) => product / denominator,
            None => {
                warn!(base = %base, share = %self, "share product overflowed; saturating");
                (base / denominator).saturating_mul(numerator)
            }
        }
    }
}

impl Default for OwnershipShare {
    fn default() -> Self {
        Self::new(0, DEFAULT_DENOMINATOR)
    }
}

impl fmt::Display for OwnershipShare {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // construction tests
    // =========================================================================

    #[test]
    fn new_keeps_parts_unreduced() {
        let share = OwnershipShare::new(50, 100);

        assert_eq!(share.numerator(), 50);
        assert_eq!(share.denominator(), 100);
    }

    #[test]
    fn new_replaces_zero_denominator() {
        let share = OwnershipShare::new(3, 0);

        assert_eq!(share.denominator(), 1);
        assert_eq!(share.ratio(), dec!(3));
    }

    #[test]
    fn default_is_nothing_out_of_ten_thousand() {
        let share = OwnershipShare::default();

        assert_eq!(share.numerator(), 0);
        assert_eq!(share.denominator(), DEFAULT_DENOMINATOR);
    }

    #[test]
    fn from_text_reads_grouped_digits() {
        let share = OwnershipShare::from_text("1,234", "10,000");

        assert_eq!(share, OwnershipShare::new(1234, 10000));
    }

    #[test]
    fn from_text_empty_numerator_is_zero() {
        let share = OwnershipShare::from_text("", "10000");

        assert_eq!(share.numerator(), 0);
    }

    #[test]
    fn from_text_bad_denominator_is_one() {
        assert_eq!(OwnershipShare::from_text("1", "").denominator(), 1);
        assert_eq!(OwnershipShare::from_text("1", "abc").denominator(), 1);
        assert_eq!(OwnershipShare::from_text("1", "0").denominator(), 1);
        assert_eq!(OwnershipShare::from_text("1", "-4").denominator(), 1);
    }

    #[test]
    fn from_text_negative_numerator_is_zero() {
        let share = OwnershipShare::from_text("-10", "10000");

        assert_eq!(share.numerator(), 0);
    }

    // =========================================================================
    // ratio / apply tests
    // =========================================================================

    #[test]
    fn ratio_of_ten_in_ten_thousand() {
        assert_eq!(OwnershipShare::new(10, 10000).ratio(), dec!(0.001));
    }

    #[test]
    fn apply_to_land_base() {
        let share = OwnershipShare::new(10, 10000);

        assert_eq!(share.apply(dec!(600000000)), dec!(600000));
        assert_eq!(share.apply(dec!(1200000000)), dec!(1200000));
    }

    #[test]
    fn apply_one_third_is_exact() {
        let share = OwnershipShare::new(1, 3);

        assert_eq!(share.apply(dec!(300000)), dec!(100000));
    }

    #[test]
    fn apply_saturates_instead_of_overflowing() {
        let share = OwnershipShare::from_text("9223372036854775807", "10000");

        let applied = share.apply(Decimal::from(i64::MAX));

        assert_eq!(applied, Decimal::MAX);
    }

    #[test]
    fn apply_large_but_representable_stays_exact() {
        // 9,223,372,036,854,775,807 × 3 fits, so no saturation
        let share = OwnershipShare::new(3, 3);

        assert_eq!(share.apply(Decimal::from(i64::MAX)), Decimal::from(i64::MAX));
    }

    #[test]
    fn apply_zero_share_is_zero() {
        assert_eq!(OwnershipShare::default().apply(dec!(600000000)), dec!(0));
    }

    // =========================================================================
    // display / serde tests
    // =========================================================================

    #[test]
    fn display_shows_fraction() {
        assert_eq!(OwnershipShare::new(10, 10000).to_string(), "10/10000");
    }

    #[test]
    fn deserialize_guards_zero_denominator() {
        let share: OwnershipShare =
            serde_json::from_str(r#"{"numerator": 5, "denominator": 0}"#).unwrap();

        assert_eq!(share, OwnershipShare::new(5, 1));
    }
}
