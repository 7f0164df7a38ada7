//! Proration calculations.
//!
//! The calendar and proration modules are shared by both worksheets; each
//! worksheet only decides how the annual tax is arrived at.

pub mod calendar;
pub mod common;
pub mod proration;
pub mod worksheets;

pub use worksheets::{
    CertificateBreakdown, CertificateInput, CertificateWorksheet, ValuationBreakdown,
    ValuationInput, ValuationWorksheet,
};
