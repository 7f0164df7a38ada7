//! Calendar arithmetic for the tax year.
//!
//! The tax year runs from 1 January to 31 December of the closing date's
//! year. The closing date itself belongs to the buyer: the seller carries
//! the days strictly before it, the buyer carries the closing date and every
//! day after it.
//!
//! | Closing date | Seller days | Buyer days |
//! |--------------|-------------|------------|
//! | 2024-01-01   | 0           | 366        |
//! | 2024-06-15   | 166         | 200        |
//! | 2024-12-31   | 365         | 1          |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Returns `true` for Gregorian leap years.
///
/// Divisible by 4 and not by 100, unless also divisible by 400.
///
/// ```
/// use proration_core::calculations::calendar::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`: 366 for leap years, 365 otherwise.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Whole days between 1 January of `date`'s year and `date`.
///
/// 1 January is day 0, so the result counts the days strictly before the
/// closing date.
pub fn days_from_new_year(date: NaiveDate) -> u32 {
    date.ordinal0()
}

/// Days from `date` (inclusive) to 31 December (inclusive).
pub fn remaining_days(date: NaiveDate) -> u32 {
    days_in_year(date.year()) - days_from_new_year(date)
}

/// How the tax year is split between seller and buyer for one closing date.
///
/// `seller_days + buyer_days == days_in_year` for every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPartition {
    /// Calendar year the closing date falls in.
    pub year: i32,
    pub is_leap_year: bool,
    pub days_in_year: u32,
    /// Days from 1 January up to the day before closing.
    pub seller_days: u32,
    /// Days from the closing date through 31 December.
    pub buyer_days: u32,
}

impl DayPartition {
    /// Builds the partition for a closing date.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use proration_core::DayPartition;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    /// let partition = DayPartition::for_closing_date(date);
    ///
    /// assert_eq!(partition.seller_days, 166);
    /// assert_eq!(partition.buyer_days, 200);
    /// assert_eq!(partition.days_in_year, 366);
    /// ```
    pub fn for_closing_date(date: NaiveDate) -> Self {
        let year = date.year();
        Self {
            year,
            is_leap_year: is_leap_year(year),
            days_in_year: days_in_year(year),
            seller_days: days_from_new_year(date),
            buyer_days: remaining_days(date),
        }
    }
}
