//! Business timezone helpers
//!
//! Orders carry UTC timestamps; "today" is the calendar day in the
//! restaurant's timezone, as a half-open `[start, next start)` range.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use shared::error::AppError;

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> Result<Tz, AppError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AppError::config(format!("Unknown timezone: {name}")))
}

/// Local midnight of `date` in UTC
///
/// DST gap fallback: when local midnight does not exist, the naive time is read as UTC.
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Business date of an instant
pub fn business_date(at: DateTime<Utc>, tz: Tz) -> NaiveDate {
    at.with_timezone(&tz).date_naive()
}

/// `[start, end)` of the business day containing `now`
pub fn day_bounds(now: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = business_date(now, tz);
    let next = date.succ_opt().unwrap_or(date);
    (day_start(date, tz), day_start(next, tz))
}
