//! Valuation-based proration worksheet.
//!
//! Computes the annual fixed-asset tax and city-planning tax from the
//! assessed building value and the land tax bases, then splits it between
//! seller and buyer by calendar days.
//!
//! # Worksheet Structure
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Building value truncated below 1,000 yen |
//! | 2    | Building property tax: Line 1 × 1.4% (not truncated) |
//! | 3    | Building city-planning tax: Line 1 × 0.3% (not truncated) |
//! | 4a   | Land property-tax base × ownership share |
//! | 4b   | Line 4a truncated below 1,000 yen |
//! | 4c   | Land property tax: Line 4b × 1.4% (not truncated) |
//! | 5a   | Land city-planning-tax base × ownership share |
//! | 5b   | Line 5a truncated below 1,000 yen |
//! | 5c   | Line 5b × 0.3% ÷ 2 |
//! | 5d   | Land city-planning tax: Line 5c truncated below 100 yen |
//! | 6    | Total: Lines 2 + 3 + 4c + 5d |
//! | 7    | Annual tax: Line 6 truncated below 100 yen |
//!
//! Line 7 is then prorated by day (see [`Proration`]).
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use proration_core::{OwnershipShare, ValuationInput, ValuationWorksheet};
//!
//! let input = ValuationInput {
//!     closing_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
//!     building_value: dec!(12345678),
//!     land_property_tax_base: dec!(600000000),
//!     land_city_planning_tax_base: dec!(1200000000),
//!     ownership_share: OwnershipShare::new(10, 10000),
//! };
//!
//! let breakdown = ValuationWorksheet::standard().calculate(&input);
//!
//! assert_eq!(breakdown.building, dec!(12345000));
//! assert_eq!(breakdown.total_tax, dec!(220065));
//! assert_eq!(breakdown.final_tax, dec!(220000));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::calendar::DayPartition;
use crate::calculations::common::floor_to_unit;
use crate::calculations::proration::Proration;
use crate::{OwnershipShare, RatesError, TaxRates};

/// Inputs for the valuation worksheet.
///
/// Amounts are whole yen. Form text is coerced into these fields with
/// [`crate::parse::parse_amount`] and [`OwnershipShare::from_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationInput {
    /// Date ownership transfers to the buyer.
    pub closing_date: NaiveDate,

    /// Assessed value of the building.
    pub building_value: Decimal,

    /// Land taxable base for fixed-asset tax, for the whole parcel.
    pub land_property_tax_base: Decimal,

    /// Land taxable base for city-planning tax, for the whole parcel.
    pub land_city_planning_tax_base: Decimal,

    /// Share of the land being sold.
    pub ownership_share: OwnershipShare,
}

/// Every line of the valuation worksheet plus the seller/buyer split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationBreakdown {
    pub closing_date: NaiveDate,
    pub ownership_share: OwnershipShare,

    /// Building value as entered.
    pub building_value: Decimal,

    /// Line 1: building value truncated below 1,000 yen.
    pub building: Decimal,

    /// Line 2.
    pub building_property_tax: Decimal,

    /// Line 3.
    pub building_city_planning_tax: Decimal,

    /// Land property-tax base as entered.
    pub land_property_tax_base: Decimal,

    /// Line 4a.
    pub land_property_base_with_share: Decimal,

    /// Line 4b.
    pub land_property_base_floored: Decimal,

    /// Line 4c.
    pub land_property_tax: Decimal,

    /// Land city-planning-tax base as entered.
    pub land_city_planning_tax_base: Decimal,

    /// Line 5a.
    pub land_city_planning_base_with_share: Decimal,

    /// Line 5b.
    pub land_city_planning_base_floored: Decimal,

    /// Line 5c: may carry half a yen.
    pub land_city_planning_tax_before_floor: Decimal,

    /// Line 5d.
    pub land_city_planning_tax: Decimal,

    /// Line 6.
    pub total_tax: Decimal,

    /// Line 7: the amount that is prorated. Always a multiple of 100.
    pub final_tax: Decimal,

    pub proration: Proration,
}

/// Calculator for the valuation worksheet.
#[derive(Debug, Clone)]
pub struct ValuationWorksheet {
    rates: TaxRates,
}

impl ValuationWorksheet {
    /// Creates a worksheet with the given rates.
    ///
    /// # Errors
    ///
    /// Returns a [`RatesError`] when [`TaxRates::validate`] rejects `rates`.
    pub fn new(rates: TaxRates) -> Result<Self, RatesError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Creates a worksheet with [`TaxRates::STANDARD`].
    pub fn standard() -> Self {
        Self {
            rates: TaxRates::STANDARD,
        }
    }

    pub fn rates(&self) -> &TaxRates {
        &self.rates
    }

    /// Calculates every line and the proration.
    ///
    /// Never fails: zero inputs produce a zero breakdown.
    pub fn calculate(
        &self,
        input: &ValuationInput,
    ) -> ValuationBreakdown {
        // Line 1
        let building = self.truncate_base(input.building_value);

        // Lines 2-3
        let building_property_tax = building * self.rates.property_tax_rate;
        let building_city_planning_tax = building * self.rates.city_planning_tax_rate;
        debug!(
            building = %building,
            property_tax = %building_property_tax,
            city_planning_tax = %building_city_planning_tax,
            "building taxes"
        );

        // Lines 4a-4c
        let land_property_base_with_share =
            input.ownership_share.apply(input.land_property_tax_base);
        let land_property_base_floored = self.truncate_base(land_property_base_with_share);
        let land_property_tax = land_property_base_floored * self.rates.property_tax_rate;

        // Lines 5a-5d
        let land_city_planning_base_with_share =
            input.ownership_share.apply(input.land_city_planning_tax_base);
        let land_city_planning_base_floored =
            self.truncate_base(land_city_planning_base_with_share);
        let land_city_planning_tax_before_floor =
            self.land_city_planning_tax(land_city_planning_base_floored);
        let land_city_planning_tax = self.truncate_tax(land_city_planning_tax_before_floor);
        debug!(
            share = %input.ownership_share,
            property_tax = %land_property_tax,
            city_planning_tax = %land_city_planning_tax,
            "land taxes"
        );

        // Lines 6-7
        let total_tax = building_property_tax
            .saturating_add(building_city_planning_tax)
            .saturating_add(land_property_tax)
            .saturating_add(land_city_planning_tax);
        let final_tax = self.truncate_tax(total_tax);
        debug!(total_tax = %total_tax, final_tax = %final_tax, "annual tax");

        let proration =
            Proration::split(final_tax, DayPartition::for_closing_date(input.closing_date));

        ValuationBreakdown {
            closing_date: input.closing_date,
            ownership_share: input.ownership_share,
            building_value: input.building_value,
            building,
            building_property_tax,
            building_city_planning_tax,
            land_property_tax_base: input.land_property_tax_base,
            land_property_base_with_share,
            land_property_base_floored,
            land_property_tax,
            land_city_planning_tax_base: input.land_city_planning_tax_base,
            land_city_planning_base_with_share,
            land_city_planning_base_floored,
            land_city_planning_tax_before_floor,
            land_city_planning_tax,
            total_tax,
            final_tax,
            proration,
        }
    }

    /// Land pays city-planning tax at half rate (Line 5c).
    fn land_city_planning_tax(
        &self,
        base: Decimal,
    ) -> Decimal {
        (base * self.rates.city_planning_tax_rate)
            .checked_div(self.rates.land_city_planning_divisor)
            .unwrap_or(Decimal::MAX)
    }

    fn truncate_base(
        &self,
        value: Decimal,
    ) -> Decimal {
        floor_to_unit(value, self.rates.base_truncation_unit)
    }

    fn truncate_tax(
        &self,
        value: Decimal,
    ) -> Decimal {
        floor_to_unit(value, self.rates.tax_truncation_unit)
    }
}

impl Default for ValuationWorksheet {
    fn default() -> Self {
        Self::standard()
    }
}
