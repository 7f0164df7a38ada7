//! Property-tax and city-planning-tax proration for real-estate closings.
//!
//! Two worksheets produce an annual tax figure which is then split between
//! seller and buyer by calendar days:
//!
//! - [`ValuationWorksheet`] starts from assessed values and an ownership share.
//! - [`CertificateWorksheet`] starts from the four amounts printed on an
//!   official tax certificate.

pub mod calculations;
pub mod models;
pub mod parse;

pub use calculations::calendar::DayPartition;
pub use calculations::proration::Proration;
pub use calculations::worksheets::{
    CertificateBreakdown, CertificateInput, CertificateWorksheet, ValuationBreakdown,
    ValuationInput, ValuationWorksheet,
};
pub use models::*;
