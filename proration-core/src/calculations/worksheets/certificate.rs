//! Certificate-based proration worksheet.
//!
//! The four annual amounts are copied from an official tax certificate, where
//! the taxing authority has already applied rates and rounding. The worksheet
//! only totals them and splits the total by calendar days; no further
//! truncation is applied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::calendar::DayPartition;
use crate::calculations::proration::Proration;

/// Annual amounts read from a tax certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInput {
    pub closing_date: NaiveDate,
    pub building_property_tax: Decimal,
    pub building_city_planning_tax: Decimal,
    pub land_property_tax: Decimal,
    pub land_city_planning_tax: Decimal,
}

/// Certificate amounts, their subtotals and the seller/buyer split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateBreakdown {
    pub closing_date: NaiveDate,
    pub building_property_tax: Decimal,
    pub building_city_planning_tax: Decimal,
    pub land_property_tax: Decimal,
    pub land_city_planning_tax: Decimal,

    /// Building property tax + building city-planning tax.
    pub building_total: Decimal,

    /// Land property tax + land city-planning tax.
    pub land_total: Decimal,

    /// Building total + land total; prorated as-is.
    pub total_tax: Decimal,

    pub proration: Proration,
}

/// Calculator for the certificate worksheet.
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use proration_core::{CertificateInput, CertificateWorksheet};
///
/// let input = CertificateInput {
///     closing_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     building_property_tax: dec!(168000),
///     building_city_planning_tax: dec!(36000),
///     land_property_tax: dec!(84000),
///     land_city_planning_tax: dec!(36000),
/// };
///
/// let breakdown = CertificateWorksheet.calculate(&input);
///
/// assert_eq!(breakdown.total_tax, dec!(324000));
/// assert_eq!(breakdown.proration.seller_payment, dec!(79890));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateWorksheet;

impl CertificateWorksheet {
    /// Totals the certificate amounts and prorates the total.
    pub fn calculate(
        &self,
        input: &CertificateInput,
    ) -> CertificateBreakdown {
        let building_total = input.building_property_tax + input.building_city_planning_tax;
        let land_total = input.land_property_tax + input.land_city_planning_tax;
        let total_tax = building_total + land_total;
        debug!(
            building_total = %building_total,
            land_total = %land_total,
            total_tax = %total_tax,
            "certificate totals"
        );

        let proration =
            Proration::split(total_tax, DayPartition::for_closing_date(input.closing_date));

        CertificateBreakdown {
            closing_date: input.closing_date,
            building_property_tax: input.building_property_tax,
            building_city_planning_tax: input.building_city_planning_tax,
            land_property_tax: input.land_property_tax,
            land_city_planning_tax: input.land_city_planning_tax,
            building_total,
            land_total,
            total_tax,
            proration,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn certificate(
        closing_date: NaiveDate,
        amounts: [Decimal; 4],
    ) -> CertificateInput {
        let [
            building_property_tax,
            building_city_planning_tax,
            land_property_tax,
            land_city_planning_tax,
        ] = amounts;
        CertificateInput {
            closing_date,
            building_property_tax,
            building_city_planning_tax,
            land_property_tax,
            land_city_planning_tax,
        }
    }

    fn date(
        year: i32,
        month: u32,
        day: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn subtotals_and_total() {
        let input = certificate(
            date(2025, 4, 1),
            [dec!(168000), dec!(36000), dec!(84000), dec!(36000)],
        );

        let result = CertificateWorksheet.calculate(&input);

        assert_eq!(result.building_total, dec!(204000));
        assert_eq!(result.land_total, dec!(120000));
        assert_eq!(result.total_tax, dec!(324000));
    }

    #[test]
    fn total_is_not_truncated() {
        let input = certificate(
            date(2025, 4, 1),
            [dec!(12345), dec!(2646), dec!(7001), dec!(1503)],
        );

        let result = CertificateWorksheet.calculate(&input);

        assert_eq!(result.total_tax, dec!(23495));
        assert_eq!(result.proration.annual_tax, dec!(23495));
    }

    #[test]
    fn prorates_total_by_day() {
        // 324,000 × 90 / 365 = 79,890.41 → 79,890
        // 324,000 × 275 / 365 = 244,109.59 → 244,110
        let input = certificate(
            date(2025, 4, 1),
            [dec!(168000), dec!(36000), dec!(84000), dec!(36000)],
        );

        let result = CertificateWorksheet.calculate(&input);

        assert_eq!(result.proration.partition.seller_days, 90);
        assert_eq!(result.proration.partition.buyer_days, 275);
        assert_eq!(result.proration.seller_payment, dec!(79890));
        assert_eq!(result.proration.buyer_payment, dec!(244110));
    }

    #[test]
    fn empty_certificate_yields_zero() {
        let input = certificate(date(2024, 2, 29), [dec!(0); 4]);

        let result = CertificateWorksheet.calculate(&input);

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.proration.seller_payment, dec!(0));
        assert_eq!(result.proration.buyer_payment, dec!(0));
    }

    #[test]
    fn breakdown_echoes_certificate_amounts() {
        let input = certificate(
            date(2024, 11, 30),
            [dec!(1), dec!(2), dec!(3), dec!(4)],
        );

        let result = CertificateWorksheet.calculate(&input);

        assert_eq!(result.closing_date, date(2024, 11, 30));
        assert_eq!(result.building_property_tax, dec!(1));
        assert_eq!(result.building_city_planning_tax, dec!(2));
        assert_eq!(result.land_property_tax, dec!(3));
        assert_eq!(result.land_city_planning_tax, dec!(4));
    }
}
