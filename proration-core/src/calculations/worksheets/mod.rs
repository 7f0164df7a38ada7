//! Worksheet implementations.
//!
//! Each worksheet takes an explicit input struct and returns a breakdown
//! holding every intermediate line alongside the seller/buyer split.

pub mod certificate;
pub mod valuation;

pub use certificate::{CertificateBreakdown, CertificateInput, CertificateWorksheet};
pub use valuation::{ValuationBreakdown, ValuationInput, ValuationWorksheet};
