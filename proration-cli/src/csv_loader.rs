//! CSV loader for batches of closings.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Amount
//! cells are read the same way as the interactive flags: thousands
//! separators are accepted, trailing text is dropped, and unreadable or
//! negative amounts become 0.
//!
//! ### Valuation worksheet
//!
//! | Column                        | Required | Notes                                      |
//! |-------------------------------|----------|--------------------------------------------|
//! | `closing_date`                | yes      | `YYYY-MM-DD`                               |
//! | `building_value`              | yes      | assessed building value                    |
//! | `land_property_tax_base`      | no       | empty means 0                              |
//! | `land_city_planning_tax_base` | no       | empty means 0                              |
//! | `ownership_numerator`         | no       | empty means 0                              |
//! | `ownership_denominator`       | no       | empty means the configured default         |
//!
//! ```csv
//! closing_date,building_value,land_property_tax_base,land_city_planning_tax_base,ownership_numerator,ownership_denominator
//! 2024-06-15,"12,345,678",600000000,1200000000,10,10000
//! ```
//!
//! ### Certificate worksheet
//!
//! | Column                       | Required | Notes         |
//! |------------------------------|----------|---------------|
//! | `closing_date`               | yes      | `YYYY-MM-DD`  |
//! | `building_property_tax`      | yes      |               |
//! | `building_city_planning_tax` | yes      |               |
//! | `land_property_tax`          | yes      |               |
//! | `land_city_planning_tax`     | yes      |               |
//!
//! ```csv
//! closing_date,building_property_tax,building_city_planning_tax,land_property_tax,land_city_planning_tax
//! 2025-04-01,168000,36000,84000,36000
//! ```

use std::path::Path;

use chrono::NaiveDate;
use proration_core::parse::parse_amount;
use proration_core::{CertificateInput, OwnershipShare, ValuationInput};
use serde::Deserialize;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Rows as they appear in the file
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValuationRow {
    closing_date: String,
    building_value: String,
    #[serde(default)]
    land_property_tax_base: Option<String>,
    #[serde(default)]
    land_city_planning_tax_base: Option<String>,
    #[serde(default)]
    ownership_numerator: Option<String>,
    #[serde(default)]
    ownership_denominator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CertificateRow {
    closing_date: String,
    building_property_tax: String,
    building_city_planning_tax: String,
    land_property_tax: String,
    land_city_planning_tax: String,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad structure or a missing required column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, counting data rows only.
    #[error("invalid closing date '{value}' on row {row} (expected YYYY-MM-DD)")]
    InvalidDate { value: String, row: usize },
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn parse_date(
    value: String,
    row: usize,
) -> Result<NaiveDate, CsvLoadError> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| CsvLoadError::InvalidDate { value, row })
}

fn optional_amount(cell: Option<&str>) -> rust_decimal::Decimal {
    cell.map(parse_amount).unwrap_or_default()
}

fn convert_valuation(
    row: ValuationRow,
    row_number: usize,
    default_denominator: u64,
) -> Result<ValuationInput, CsvLoadError> {
    let closing_date = parse_date(row.closing_date, row_number)?;

    let denominator = match row.ownership_denominator.as_deref() {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => default_denominator.to_string(),
    };
    let ownership_share = OwnershipShare::from_text(
        row.ownership_numerator.as_deref().unwrap_or_default(),
        &denominator,
    );

    Ok(ValuationInput {
        closing_date,
        building_value: parse_amount(&row.building_value),
        land_property_tax_base: optional_amount(row.land_property_tax_base.as_deref()),
        land_city_planning_tax_base: optional_amount(row.land_city_planning_tax_base.as_deref()),
        ownership_share,
    })
}

fn convert_certificate(
    row: CertificateRow,
    row_number: usize,
) -> Result<CertificateInput, CsvLoadError> {
    Ok(CertificateInput {
        closing_date: parse_date(row.closing_date, row_number)?,
        building_property_tax: parse_amount(&row.building_property_tax),
        building_city_planning_tax: parse_amount(&row.building_city_planning_tax),
        land_property_tax: parse_amount(&row.land_property_tax),
        land_city_planning_tax: parse_amount(&row.land_city_planning_tax),
    })
}

fn reader(input: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes())
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Parses valuation rows from CSV text, in file order.
///
/// `default_denominator` fills an empty or missing `ownership_denominator`.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is malformed or a required column
///   is missing.
/// * [`CsvLoadError::InvalidDate`] if a closing date cannot be read.
pub fn load_valuations_from_str(
    input: &str,
    default_denominator: u64,
) -> Result<Vec<ValuationInput>, CsvLoadError> {
    let inputs = reader(input)
        .deserialize::<ValuationRow>()
        .enumerate()
        .map(|(idx, result)| convert_valuation(result?, idx + 1, default_denominator))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(rows = inputs.len(), "loaded valuation batch");
    Ok(inputs)
}

/// Reads a file from disk and delegates to [`load_valuations_from_str`].
pub fn load_valuations_from_file(
    path: &Path,
    default_denominator: u64,
) -> Result<Vec<ValuationInput>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_valuations_from_str(&contents, default_denominator)
}

/// Parses certificate rows from CSV text, in file order.
///
/// # Errors
///
/// Same as [`load_valuations_from_str`].
pub fn load_certificates_from_str(input: &str) -> Result<Vec<CertificateInput>, CsvLoadError> {
    let inputs = reader(input)
        .deserialize::<CertificateRow>()
        .enumerate()
        .map(|(idx, result)| convert_certificate(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(rows = inputs.len(), "loaded certificate batch");
    Ok(inputs)
}

/// Reads a file from disk and delegates to [`load_certificates_from_str`].
pub fn load_certificates_from_file(path: &Path) -> Result<Vec<CertificateInput>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_certificates_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
