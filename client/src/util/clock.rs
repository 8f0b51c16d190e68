//! Wall-clock access for token expiry checks and timestamps shown in lists.
//!
//! `std::time::SystemTime::now` panics on `wasm32-unknown-unknown`, so the
//! browser build asks `Date.now()` instead. `chrono` is built with
//! `wasmbind`, which routes `Utc::now` and `Local` through the same clock.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Current time in whole seconds since the Unix epoch.
#[cfg_attr(feature = "csr", allow(clippy::cast_possible_truncation))]
pub fn unix_now() -> i64 {
    #[cfg(feature = "csr")]
    {
        (js_sys::Date::now() / 1000.0).floor() as i64
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339, an offset-less `YYYY-MM-DDTHH:MM:SS` (read as UTC), or a
/// bare `YYYY-MM-DD` (midnight UTC, as the donation form sends expiry dates).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// `dd/mm/yyyy, hh:mm` in the browser's zone.
pub fn format_local(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y, %H:%M").to_string()
}

/// Display form of a server timestamp; unparseable input is shown as sent.
pub fn format_timestamp(raw: &str) -> String {
    parse_instant(raw).map_or_else(|| raw.to_owned(), format_local)
}

/// Wire form for request bodies: RFC 3339 UTC with milliseconds.
pub fn to_wire(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
