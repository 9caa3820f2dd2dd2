//! Conversions between wall-clock input and absolute instants

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::LOCAL_INPUT_FORMAT;
use crate::errors::{AgendaError, Result};

/// Parse a `YYYY-MM-DDTHH:MM` wall-clock value in `tz`.
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant.
///
/// # Errors
/// Returns `AgendaError::Validation` for malformed input or a wall-clock
/// time skipped by a daylight-saving jump.
pub fn parse_local_input(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), LOCAL_INPUT_FORMAT).map_err(|e| {
        AgendaError::Validation(format!("invalid date/time '{input}' (expected YYYY-MM-DDTHH:MM): {e}"))
    })?;
    resolve_local(naive, tz, input)
}

/// Parse a `YYYY-MM-DD` date as local midnight in `tz`.
///
/// # Errors
/// Returns `AgendaError::Validation` for malformed dates.
pub fn parse_local_date(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| AgendaError::Validation(format!("invalid date '{input}': {e}")))?;
    resolve_local(date.and_time(NaiveTime::MIN), tz, input)
}

fn resolve_local(naive: NaiveDateTime, tz: Tz, input: &str) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(AgendaError::Validation(format!(
            "'{input}' does not exist in time zone {tz}"
        ))),
    }
}

/// Render an instant as `YYYY-MM-DDTHH:MM` in `tz`.
#[must_use]
pub fn format_local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format(LOCAL_INPUT_FORMAT).to_string()
}

/// Wire form of an instant: RFC 3339 in UTC with milliseconds and `Z`.
#[must_use]
pub fn to_wire(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
