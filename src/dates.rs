use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::warn;

/// Sentinel for "unknown", later than any date the API can return.
pub const DISTANT_FUTURE: DateTime<Utc> = DateTime::<Utc>::MAX_UTC;

/// Resolve a date string into a comparable instant.
pub fn resolve(raw: &str) -> DateTime<Utc> {
    if raw.is_empty() {
        return DISTANT_FUTURE;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::default())),
        Err(err) => {
            warn!(date = raw, %err, "could not parse date");
            DISTANT_FUTURE
        }
    }
}

pub fn is_known(instant: &DateTime<Utc>) -> bool {
    *instant != DISTANT_FUTURE
}

/// Format a due date for display, e.g. `Jun 1, 2023`.
///
/// The calendar day is taken as written, in the offset the value carries,
/// so `2023-06-01T00:30:00+02:00` stays on June 1.
pub fn format_due(raw: &str) -> Option<String> {
    let date = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.date_naive(),
        Err(_) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?,
    };
    Some(date.format("%b %-d, %Y").to_string())
}
