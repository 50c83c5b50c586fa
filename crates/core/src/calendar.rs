//! Calendar date arithmetic shared by the accounting period systems and the
//! unit-kind converter.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Earliest year a unit of time may carry.
pub const MIN_YEAR: i32 = 1;

/// Latest year a unit of time may carry.
pub const MAX_YEAR: i32 = 9999;

/// Returns the first day of a month, or `None` for an invalid month.
#[must_use]
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns the last day of a month (leap-year aware), or `None` for an
/// invalid month.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }

    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month?.pred_opt()
}

/// Returns true if `date` is the last day of its month.
#[must_use]
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    last_day_of_month(date.year(), date.month()) == Some(date)
}

/// Most recent occurrence of `weekday` strictly before `date`.
#[must_use]
pub fn previous_weekday(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let back = (7 + date.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    let back = if back == 0 { 7 } else { back };
    date.checked_sub_days(Days::new(u64::from(back)))
}

/// First occurrence of `weekday` strictly after `date`.
#[must_use]
pub fn next_weekday(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let forward = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    let forward = if forward == 0 { 7 } else { forward };
    date.checked_add_days(Days::new(u64::from(forward)))
}

/// Shifts a date by whole years; 29 February clamps to 28 February.
#[must_use]
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let months = Months::new(years.unsigned_abs().checked_mul(12)?);
    if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

/// Number of days in the inclusive range `[first, last]`.
#[must_use]
pub fn days_inclusive(first: NaiveDate, last: NaiveDate) -> i64 {
    (last - first).num_days() + 1
}

/// Position of a month on a continuous month grid (`year * 12 + month - 1`).
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn month_ordinal(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

/// Inverse of [`month_ordinal`]: `(year, month)`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn from_month_ordinal(ordinal: i32) -> (i32, u32) {
    (ordinal.div_euclid(12), ordinal.rem_euclid(12) as u32 + 1)
}

/// English ordinal suffix ("st", "nd", "rd", "th").
#[must_use]
pub const fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
