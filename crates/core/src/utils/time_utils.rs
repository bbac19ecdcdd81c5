use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::constants::SECONDS_PER_DAY;
use crate::errors::{Error, Result};

/// Default timezone for evaluation instants.
/// Goal dates are calendar dates, so "now" must be expressed as local wall time
/// before it is compared with them.
pub const DEFAULT_EVALUATION_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to local wall time in the given timezone.
///
/// This is the single source of truth for turning instants into the
/// `NaiveDateTime` the engine evaluates against.
pub fn evaluation_instant_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// Convenience function that uses the default evaluation timezone.
pub fn evaluation_now() -> NaiveDateTime {
    evaluation_instant_from_utc(Utc::now(), DEFAULT_EVALUATION_TZ)
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Signed number of (possibly fractional) days from `from` to `to`.
pub fn fractional_days_between(from: NaiveDateTime, to: NaiveDateTime) -> Decimal {
    let seconds = (to - from).num_seconds();
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_DAY)
}

/// Parses a calendar date. Accepts `YYYY-MM-DD` or any timestamp accepted by
/// [`parse_datetime`], in which case the time component is dropped.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(date_err) => parse_datetime(trimmed)
            .map(|dt| dt.date())
            .map_err(|_| Error::from(date_err)),
    }
}

/// Parses a timestamp as local wall time in [`DEFAULT_EVALUATION_TZ`], the
/// same frame [`evaluation_now`] produces.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    parse_datetime_in(value, DEFAULT_EVALUATION_TZ)
}

/// Parses a timestamp as local wall time in `tz`.
///
/// Accepted shapes:
/// - RFC 3339 (`2024-01-01T10:00:00Z`, `2024-01-01T10:00:00+02:00`), converted to `tz`
/// - `YYYY-MM-DD HH:MM:SS[.f]`, already local
/// - `YYYY-MM-DDTHH:MM:SS[.f]`, already local
/// - `YYYY-MM-DD` (local midnight)
pub fn parse_datetime_in(value: &str, tz: Tz) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(evaluation_instant_from_utc(dt.with_timezone(&Utc), tz));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(Error::from)
}
