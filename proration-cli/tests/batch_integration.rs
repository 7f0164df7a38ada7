//! Integration tests that read the on-disk fixtures end-to-end: CSV batch
//! files through the worksheets, and the sample config file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use proration_cli::config::{Config, OutputFormat};
use proration_cli::{csv_loader, report};
use proration_core::{CertificateWorksheet, OwnershipShare, ValuationWorksheet};
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// ---------------------------------------------------------------------------
// Valuation batch
// ---------------------------------------------------------------------------

#[test]
fn valuation_fixture_loads_every_row() {
    let inputs = csv_loader::load_valuations_from_file(&fixture("valuations.csv"), 10000)
        .expect("fixture should load");

    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs[0].building_value, dec!(12345678));
    // empty share columns fall back to 0 over the default denominator
    assert_eq!(inputs[1].ownership_share, OwnershipShare::new(0, 10000));
    assert_eq!(inputs[2].ownership_share, OwnershipShare::new(1, 3));
}

#[test]
fn valuation_fixture_calculates() {
    let inputs =
        csv_loader::load_valuations_from_file(&fixture("valuations.csv"), 10000).unwrap();
    let worksheet = ValuationWorksheet::standard();

    let results: Vec<_> = inputs.iter().map(|i| worksheet.calculate(i)).collect();

    assert_eq!(results[0].final_tax, dec!(220000));
    assert_eq!(results[0].proration.seller_payment, dec!(99781));
    assert_eq!(results[0].proration.buyer_payment, dec!(120219));

    // building only: 112,000 + 24,000
    assert_eq!(results[1].final_tax, dec!(136000));
    assert_eq!(results[1].proration.seller_payment, dec!(67814));
    assert_eq!(results[1].proration.buyer_payment, dec!(68186));

    // a one-third share of land
    assert_eq!(results[2].land_property_base_floored, dec!(10000000));
    assert_eq!(results[2].land_city_planning_tax, dec!(30000));
    assert_eq!(results[2].final_tax, dec!(255000));
    assert_eq!(results[2].proration.seller_payment, dec!(254301));
    assert_eq!(results[2].proration.buyer_payment, dec!(699));
}

#[test]
fn valuation_fixture_renders_one_report_per_row() {
    let inputs =
        csv_loader::load_valuations_from_file(&fixture("valuations.csv"), 10000).unwrap();
    let worksheet = ValuationWorksheet::standard();

    let text: String = inputs
        .iter()
        .map(|i| report::render_valuation(&worksheet.calculate(i), worksheet.rates(), false))
        .collect();

    assert_eq!(text.matches("SETTLEMENT").count(), 3);
}

// ---------------------------------------------------------------------------
// Certificate batch
// ---------------------------------------------------------------------------

#[test]
fn certificate_fixture_calculates() {
    let inputs = csv_loader::load_certificates_from_file(&fixture("certificates.csv"))
        .expect("fixture should load");

    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].closing_date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());

    let first = CertificateWorksheet.calculate(&inputs[0]);
    assert_eq!(first.total_tax, dec!(324000));
    assert_eq!(first.proration.seller_payment, dec!(79890));
    assert_eq!(first.proration.buyer_payment, dec!(244110));
}

#[test]
fn certificate_fixture_reports_half_yen_residual() {
    let inputs = csv_loader::load_certificates_from_file(&fixture("certificates.csv")).unwrap();

    let breakdown = CertificateWorksheet.calculate(&inputs[1]);

    assert_eq!(breakdown.proration.seller_payment, dec!(92));
    assert_eq!(breakdown.proration.buyer_payment, dec!(92));
    assert_eq!(breakdown.proration.rounding_residual, dec!(1));

    let text = report::render_certificate(&breakdown, false);
    assert!(text.contains("differ from the annual tax by 1 yen (rounding, over)"));
}

#[test]
fn batch_serializes_as_json_array() {
    let inputs = csv_loader::load_certificates_from_file(&fixture("certificates.csv")).unwrap();
    let breakdowns: Vec<_> = inputs
        .iter()
        .map(|i| CertificateWorksheet.calculate(i))
        .collect();

    let json = report::to_json(&breakdowns).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert_eq!(value[1]["closing_date"], "2024-07-02");
}

#[test]
fn missing_batch_file_is_an_io_error() {
    let result = csv_loader::load_certificates_from_file(&fixture("no_such_file.csv"));

    assert!(matches!(result, Err(csv_loader::CsvLoadError::Io(_))));
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

#[test]
fn sample_config_loads() {
    let config = Config::load(Some(fixture("proration.toml").as_path())).expect("config should load");

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.output.detail);
    assert_eq!(config.ownership.default_denominator, 100);
}
