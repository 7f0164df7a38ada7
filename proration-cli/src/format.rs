//! Display helpers for yen amounts.

use rust_decimal::Decimal;

/// Formats an amount with grouped thousands, e.g. `12,345,678`.
///
/// Whole amounts print without decimals. Fractional amounts keep their
/// significant digits (`226.5`), so intermediate lines are shown exactly.
pub fn format_yen(amount: Decimal) -> String {
    let normalized = amount.normalize().to_string();
    let (sign, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", normalized.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats an amount followed by the yen sign suffix used in reports.
pub fn format_yen_suffixed(amount: Decimal) -> String {
    format!("{} yen", format_yen(amount))
}

/// Formats a rate such as `0.014` as `1.4%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
