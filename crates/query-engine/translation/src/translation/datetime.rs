//! Date and time layouts shared by predicates, projections and stored values.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::Error;

/// The postgres layout used to parse date literals in predicates and to format projected dates.
pub const DATE_TEMPLATE: &str = "YYYY-MM-DD HH24:MI:SS:MSZ";

/// The chrono equivalent of `DATE_TEMPLATE`, for reading projected dates back.
pub const PROJECTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S:%3fZ";

/// The layout dates are stored with: whole seconds, no time zone suffix.
pub const STORED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Truncate a date time to whole seconds, dropping any fraction and time zone suffix.
///
/// The wall-clock time is kept as written: `2024-01-01T10:00:00.123+02:00` becomes
/// `2024-01-01T10:00:00`. Predicate literals are only parsed to second precision.
pub fn truncate_to_seconds(value: &str) -> Result<String, Error> {
    parse_input(value).map(|datetime| datetime.format(STORED_FORMAT).to_string())
}

/// The current time, truncated to whole seconds.
pub fn now() -> String {
    format_utc(Utc::now())
}

pub fn format_utc(datetime: DateTime<Utc>) -> String {
    datetime.naive_utc().format(STORED_FORMAT).to_string()
}

/// Read a date produced by a projection.
pub fn parse_projected(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, PROJECTED_FORMAT)
        .map_err(|_| Error::InvalidDateTime(value.to_string()))
}

fn parse_input(value: &str) -> Result<NaiveDateTime, Error> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.naive_local());
    }
    NAIVE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| Error::InvalidDateTime(value.to_string()))
}
