//! Daily proration of an annual tax between seller and buyer.
//!
//! The annual amount is divided by the number of days in the year and each
//! party pays the daily rate times the days they carry, rounded half-up to
//! whole yen. The rate is a binary floating-point value, so a share that is
//! exactly half a yen on paper can land just below the midpoint: 100,005 yen
//! over 183 of 366 days pays 50,002, not 50,003. The two shares are rounded
//! independently and may miss the annual amount by one yen either way. That
//! difference is reported in [`Proration::rounding_residual`] and left alone.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::calendar::DayPartition;
use crate::calculations::common::round_to_yen;

/// Seller/buyer split of one annual tax amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proration {
    /// Annual tax being split.
    pub annual_tax: Decimal,

    /// Day counts for the closing date's year.
    pub partition: DayPartition,

    /// Annual tax divided by days in the year, unrounded. Shown for
    /// reference; payments use the same quotient in `f64`.
    pub daily_rate: Decimal,

    /// Seller's share for the days before closing, rounded to whole yen.
    pub seller_payment: Decimal,

    /// Buyer's share from the closing date to year end, rounded to whole yen.
    pub buyer_payment: Decimal,

    /// `seller_payment + buyer_payment - annual_tax`; between -1 and 1.
    pub rounding_residual: Decimal,
}

impl Proration {
    /// Splits `annual_tax` over the given day partition.
    ///
    /// Each payment is `round(annual_tax / days_in_year * days)`, evaluated in
    /// `f64`. Amounts beyond `f64` range fall back to the decimal rate.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rust_decimal_macros::dec;
    /// use proration_core::{DayPartition, Proration};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    /// let proration = Proration::split(dec!(324000), DayPartition::for_closing_date(date));
    ///
    /// assert_eq!(proration.seller_payment, dec!(146951));
    /// assert_eq!(proration.buyer_payment, dec!(177049));
    /// ```
    pub fn split(
        annual_tax: Decimal,
        partition: DayPartition,
    ) -> Self {
        let days_in_year = Decimal::from(partition.days_in_year);
        let daily_rate = annual_tax / days_in_year;

        let seller_payment = Self::share_for_days(
            annual_tax,
            daily_rate,
            partition.seller_days,
            partition.days_in_year,
        );
        let buyer_payment = Self::share_for_days(
            annual_tax,
            daily_rate,
            partition.buyer_days,
            partition.days_in_year,
        );
        let rounding_residual = seller_payment
            .saturating_add(buyer_payment)
            .saturating_sub(annual_tax);

        debug!(
            annual_tax = %annual_tax,
            seller_days = partition.seller_days,
            buyer_days = partition.buyer_days,
            seller_payment = %seller_payment,
            buyer_payment = %buyer_payment,
            "prorated annual tax"
        );
        if !rounding_residual.is_zero() {
            debug!(
                residual = %rounding_residual,
                "seller and buyer shares do not sum to the annual tax"
            );
        }

        Self {
            annual_tax,
            partition,
            daily_rate,
            seller_payment,
            buyer_payment,
            rounding_residual,
        }
    }

    /// Seller's share of the year as a percentage, one decimal place.
    pub fn seller_share_percent(&self) -> Decimal {
        Self::percent_of_year(self.partition.seller_days, self.partition.days_in_year)
    }

    /// Buyer's share of the year as a percentage, one decimal place.
    pub fn buyer_share_percent(&self) -> Decimal {
        Self::percent_of_year(self.partition.buyer_days, self.partition.days_in_year)
    }

    fn share_for_days(
        annual_tax: Decimal,
        daily_rate: Decimal,
        days: u32,
        days_in_year: u32,
    ) -> Decimal {
        annual_tax
            .to_f64()
            .map(|annual| (annual / f64::from(days_in_year) * f64::from(days)).round())
            .and_then(Decimal::from_f64)
            .unwrap_or_else(|| round_to_yen(daily_rate.saturating_mul(Decimal::from(days))))
    }

    fn percent_of_year(
        days: u32,
        days_in_year: u32,
    ) -> Decimal {
        (Decimal::from(days) * Decimal::ONE_HUNDRED / Decimal::from(days_in_year)).round_dp(1)
    }
}
