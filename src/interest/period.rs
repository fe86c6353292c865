use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::{Result, TrackerError};

/// every month counts as 30 days when converting a day-of-month delta
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// whole calendar months plus the day-of-month delta over 30, with no range guard.
///
/// Not calendar-accurate: Jan 1 → Jan 31 and Feb 1 → Mar 1 are both exactly one
/// month. Negative when `end` precedes `start`.
pub fn raw_month_span(start: NaiveDate, end: NaiveDate) -> Decimal {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month0()) - i64::from(start.month0());
    let whole = years * 12 + months;
    let day_diff = i64::from(end.day()) - i64::from(start.day());

    (Decimal::from(whole) + Decimal::from(day_diff) / DAYS_PER_MONTH).normalize()
}

/// signed fractional month count between two calendar dates.
///
/// Returns zero when `end < start`. The result can still be zero or negative
/// for `end >= start` (Jan 31 → Feb 1 is `1 - 30/30`), which callers must
/// reject as too short.
pub fn month_span(start: NaiveDate, end: NaiveDate) -> Decimal {
    if end < start {
        return Decimal::ZERO;
    }
    raw_month_span(start, end)
}

/// month span for a calculation request, rejecting inverted and empty periods
pub fn resolve_period(start: NaiveDate, end: NaiveDate) -> Result<Decimal> {
    if end < start {
        return Err(TrackerError::InvertedRange { start, end });
    }

    let months = month_span(start, end);
    if months <= Decimal::ZERO {
        return Err(TrackerError::PeriodTooShort { start, end, months });
    }

    Ok(months)
}
