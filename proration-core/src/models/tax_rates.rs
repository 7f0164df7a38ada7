//! Standard tax rates and the city-planning divisor applied to land.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a rate table is outside its valid range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatesError {
    #[error("property tax rate must be between 0 and 1, got {0}")]
    InvalidPropertyTaxRate(Decimal),

    #[error("city planning tax rate must be between 0 and 1, got {0}")]
    InvalidCityPlanningTaxRate(Decimal),

    #[error("land city planning divisor must be positive, got {0}")]
    InvalidLandCityPlanningDivisor(Decimal),

    #[error("truncation unit must be positive, got {0}")]
    InvalidTruncationUnit(Decimal),
}

/// Statutory rates and truncation units used by the valuation worksheet.
///
/// Only [`TaxRates::STANDARD`] is used in practice; the struct exists so the
/// worksheet reads its constants from one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Fixed-asset (property) tax rate: 1.4%.
    pub property_tax_rate: Decimal,

    /// City-planning tax rate: 0.3%.
    pub city_planning_tax_rate: Decimal,

    /// Residential land pays half the city-planning tax.
    pub land_city_planning_divisor: Decimal,

    /// Taxable bases are truncated to this unit before a rate is applied.
    pub base_truncation_unit: Decimal,

    /// Tax amounts are truncated to this unit.
    pub tax_truncation_unit: Decimal,
}

impl TaxRates {
    pub const STANDARD: Self = Self {
        property_tax_rate: dec!(0.014),
        city_planning_tax_rate: dec!(0.003),
        land_city_planning_divisor: dec!(2),
        base_truncation_unit: dec!(1000),
        tax_truncation_unit: dec!(100),
    };

    /// Checks every rate and unit is in range.
    ///
    /// # Errors
    ///
    /// Returns the first [`RatesError`] found, checking rates before units.
    pub fn validate(&self) -> Result<(), RatesError> {
        if !is_fraction(self.property_tax_rate) {
            return Err(RatesError::InvalidPropertyTaxRate(self.property_tax_rate));
        }
        if !is_fraction(self.city_planning_tax_rate) {
            return Err(RatesError::InvalidCityPlanningTaxRate(
                self.city_planning_tax_rate,
            ));
        }
        if self.land_city_planning_divisor <= Decimal::ZERO {
            return Err(RatesError::InvalidLandCityPlanningDivisor(
                self.land_city_planning_divisor,
            ));
        }
        for unit in [self.base_truncation_unit, self.tax_truncation_unit] {
            if unit <= Decimal::ZERO {
                return Err(RatesError::InvalidTruncationUnit(unit));
            }
        }
        Ok(())
    }
}

impl Default for TaxRates {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn standard_rates_are_valid() {
        assert_eq!(TaxRates::STANDARD.validate(), Ok(()));
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(TaxRates::default(), TaxRates::STANDARD);
    }

    #[test]
    fn standard_rates_match_statute() {
        let rates = TaxRates::STANDARD;

        assert_eq!(rates.property_tax_rate, dec!(0.014));
        assert_eq!(rates.city_planning_tax_rate, dec!(0.003));
        assert_eq!(rates.land_city_planning_divisor, dec!(2));
        assert_eq!(rates.base_truncation_unit, dec!(1000));
        assert_eq!(rates.tax_truncation_unit, dec!(100));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let rates = TaxRates {
            property_tax_rate: dec!(1.4),
            ..TaxRates::STANDARD
        };

        assert_eq!(
            rates.validate(),
            Err(RatesError::InvalidPropertyTaxRate(dec!(1.4)))
        );
    }

    #[test]
    fn validate_rejects_negative_city_planning_rate() {
        let rates = TaxRates {
            city_planning_tax_rate: dec!(-0.003),
            ..TaxRates::STANDARD
        };

        assert_eq!(
            rates.validate(),
            Err(RatesError::InvalidCityPlanningTaxRate(dec!(-0.003)))
        );
    }

    #[test]
    fn validate_rejects_zero_divisor() {
        let rates = TaxRates {
            land_city_planning_divisor: dec!(0),
            ..TaxRates::STANDARD
        };

        assert_eq!(
            rates.validate(),
            Err(RatesError::InvalidLandCityPlanningDivisor(dec!(0)))
        );
    }

    #[test]
    fn validate_rejects_zero_truncation_unit() {
        let rates = TaxRates {
            tax_truncation_unit: dec!(0),
            ..TaxRates::STANDARD
        };

        assert_eq!(
            rates.validate(),
            Err(RatesError::InvalidTruncationUnit(dec!(0)))
        );
    }
}
