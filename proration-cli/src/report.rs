//! Plain-text rendering of worksheet breakdowns.
//!
//! Renderers build a `String` so the binary decides where it goes and tests
//! can inspect it.

use std::fmt::Write;

use proration_core::calculations::common::round_to_yen;
use proration_core::{CertificateBreakdown, DayPartition, Proration, TaxRates, ValuationBreakdown};
use serde::Serialize;

use crate::format::{format_rate, format_yen, format_yen_suffixed};

const BAR_WIDTH: u32 = 40;

/// Renders a valuation breakdown. With `detail` every worksheet line is
/// shown, numbered (1)-(4) as on the paper form.
pub fn render_valuation(
    breakdown: &ValuationBreakdown,
    rates: &TaxRates,
    detail: bool,
) -> String {
    let mut out = String::new();
    let property = format_rate(rates.property_tax_rate);
    let city = format_rate(rates.city_planning_tax_rate);
    let base_unit = format_yen(rates.base_truncation_unit);
    let tax_unit = format_yen(rates.tax_truncation_unit);

    let _ = writeln!(out, "PROPERTY TAX PRORATION (valuation)");
    let _ = writeln!(out, "  Closing date: {}", breakdown.closing_date);
    let _ = writeln!(out);

    if detail {
        let _ = writeln!(
            out,
            "BUILDING  {} (truncated below {base_unit})",
            format_yen(breakdown.building)
        );
        let _ = writeln!(
            out,
            "  {} x {property} = {}  (1)",
            format_yen(breakdown.building),
            format_yen(breakdown.building_property_tax)
        );
        let _ = writeln!(
            out,
            "  {} x {city} = {}  (2)",
            format_yen(breakdown.building),
            format_yen(breakdown.building_city_planning_tax)
        );
        let _ = writeln!(out);

        let share = &breakdown.ownership_share;
        let ratio = share.ratio();
        let _ = writeln!(out, "LAND  share {share}");
        let _ = writeln!(out, "  Property tax:");
        let _ = writeln!(
            out,
            "    {ratio:.4} x {} = {}",
            format_yen(breakdown.land_property_tax_base),
            format_yen(breakdown.land_property_base_with_share.floor())
        );
        let _ = writeln!(
            out,
            "    {} (truncated below {base_unit})",
            format_yen(breakdown.land_property_base_floored)
        );
        let _ = writeln!(
            out,
            "    {} x {property} = {}  (3)",
            format_yen(breakdown.land_property_base_floored),
            format_yen(breakdown.land_property_tax)
        );
        let _ = writeln!(out, "  City planning tax:");
        let _ = writeln!(
            out,
            "    {ratio:.4} x {} = {}",
            format_yen(breakdown.land_city_planning_tax_base),
            format_yen(breakdown.land_city_planning_base_with_share.floor())
        );
        let _ = writeln!(
            out,
            "    {} (truncated below {base_unit})",
            format_yen(breakdown.land_city_planning_base_floored)
        );
        let _ = writeln!(
            out,
            "    {} x {city} / {} = {} -> {}  (4) (truncated below {tax_unit})",
            format_yen(breakdown.land_city_planning_base_floored),
            rates.land_city_planning_divisor.normalize(),
            format_yen(round_to_yen(breakdown.land_city_planning_tax_before_floor)),
            format_yen(breakdown.land_city_planning_tax)
        );
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "  (1) + (2) + (3) + (4) = {}",
            format_yen(round_to_yen(breakdown.total_tax))
        );
        let _ = writeln!(
            out,
            "  Annual tax (truncated below {tax_unit}): {}",
            format_yen(breakdown.final_tax)
        );
        let _ = writeln!(out);
    }

    render_settlement(&mut out, &breakdown.proration);
    out
}

/// Renders a certificate breakdown. With `detail` the four certificate
/// amounts and both subtotals are listed.
pub fn render_certificate(
    breakdown: &CertificateBreakdown,
    detail: bool,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "PROPERTY TAX PRORATION (certificate)");
    let _ = writeln!(out, "  Closing date: {}", breakdown.closing_date);
    let _ = writeln!(out);

    if detail {
        let _ = writeln!(out, "BUILDING");
        write_amount(&mut out, "Property tax", breakdown.building_property_tax);
        write_amount(&mut out, "City planning tax", breakdown.building_city_planning_tax);
        write_amount(&mut out, "Subtotal", breakdown.building_total);
        let _ = writeln!(out);
        let _ = writeln!(out, "LAND");
        write_amount(&mut out, "Property tax", breakdown.land_property_tax);
        write_amount(&mut out, "City planning tax", breakdown.land_city_planning_tax);
        write_amount(&mut out, "Subtotal", breakdown.land_total);
        let _ = writeln!(out);
        write_amount(&mut out, "Total", breakdown.total_tax);
        let _ = writeln!(out);
    }

    render_settlement(&mut out, &breakdown.proration);
    out
}

/// Renders only the day counts for a closing date.
pub fn render_partition(partition: &DayPartition) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Tax year {}: {} days{}",
        partition.year,
        partition.days_in_year,
        leap_note(partition)
    );
    let _ = writeln!(
        out,
        "  Seller: {:>3} days (Jan 1 to the day before closing)",
        partition.seller_days
    );
    let _ = writeln!(
        out,
        "  Buyer:  {:>3} days (closing date to Dec 31)",
        partition.buyer_days
    );
    out
}

/// Pretty-printed JSON for any breakdown or batch of breakdowns.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Proportional bar: `#` for seller days, `.` for buyer days.
pub fn day_bar(
    partition: &DayPartition,
    width: u32,
) -> String {
    let days = partition.days_in_year.max(1);
    let seller_cells = ((partition.seller_days * width + days / 2) / days).min(width);
    let seller = "#".repeat(seller_cells as usize);
    let buyer = ".".repeat((width - seller_cells) as usize);
    format!("[{seller}{buyer}]")
}

fn render_settlement(
    out: &mut String,
    proration: &Proration,
) {
    let partition = &proration.partition;

    let _ = writeln!(out, "SETTLEMENT");
    write_amount(out, "Annual tax", proration.annual_tax);
    let _ = writeln!(
        out,
        "  {:<20}{:>20}  ({} days, Jan 1 to the day before closing)",
        "Seller pays",
        format_yen_suffixed(proration.seller_payment),
        partition.seller_days
    );
    let _ = writeln!(
        out,
        "  {:<20}{:>20}  ({} days, closing date to Dec 31)",
        "Buyer pays",
        format_yen_suffixed(proration.buyer_payment),
        partition.buyer_days
    );
    let _ = writeln!(
        out,
        "  {}  seller {}% | buyer {}%  ({} days{})",
        day_bar(partition, BAR_WIDTH),
        proration.seller_share_percent(),
        proration.buyer_share_percent(),
        partition.days_in_year,
        leap_note(partition)
    );
    if !proration.rounding_residual.is_zero() {
        let _ = writeln!(
            out,
            "  Note: payments differ from the annual tax by {} yen (rounding, {})",
            proration.rounding_residual.abs(),
            if proration.rounding_residual.is_sign_negative() {
                "short"
            } else {
                "over"
            }
        );
    }
}

fn write_amount(
    out: &mut String,
    label: &str,
    amount: rust_decimal::Decimal,
) {
    let _ = writeln!(out, "  {:<20}{:>20}", label, format_yen_suffixed(amount));
}

fn leap_note(partition: &DayPartition) -> &'static str {
    if partition.is_leap_year { ", leap year" } else { "" }
}
