//! Localized timestamps for a named timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::TimeError;

/// en-US layout: month/day/year, 12-hour clock with seconds
const LOCALE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Prefix of the text drawn on the image
pub const DISPLAY_PREFIX: &str = "Current time: ";

/// Resolve an IANA timezone identifier
pub fn parse_timezone(timezone_id: &str) -> Result<Tz, TimeError> {
    if timezone_id.is_empty() {
        return Err(TimeError::InvalidTimezone(String::new()));
    }
    timezone_id
        .parse::<Tz>()
        .map_err(|_| TimeError::InvalidTimezone(timezone_id.to_string()))
}

/// Format `now` on the wall clock of `timezone_id`, e.g. `10/19/2026, 3:04:05 PM`
pub fn format_time(timezone_id: &str, now: DateTime<Utc>) -> Result<String, TimeError> {
    let tz = parse_timezone(timezone_id)?;
    Ok(now.with_timezone(&tz).format(LOCALE_FORMAT).to_string())
}

/// The full line drawn on the image
pub fn display_text(timezone_id: &str, now: DateTime<Utc>) -> Result<String, TimeError> {
    Ok(format!("{DISPLAY_PREFIX}{}", format_time(timezone_id, now)?))
}
