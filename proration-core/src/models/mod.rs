mod ownership_share;
mod tax_rates;

pub use ownership_share::{DEFAULT_DENOMINATOR, OwnershipShare};
pub use tax_rates::{RatesError, TaxRates};
