use chrono::TimeZone;

use super::*;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn unix_now_is_after_2020() {
    assert!(unix_now() > 1_577_836_800);
}

// =============================================================
// parse_instant
// =============================================================

#[test]
fn parse_instant_reads_rfc3339_with_offset() {
    assert_eq!(parse_instant("2025-03-01T14:30:00+02:00"), Some(utc(2025, 3, 1, 12, 30)));
    assert_eq!(parse_instant("2025-03-01T12:30:00.000Z"), Some(utc(2025, 3, 1, 12, 30)));
}

#[test]
fn parse_instant_reads_offsetless_as_utc() {
    assert_eq!(parse_instant("2025-03-01T12:30:00"), Some(utc(2025, 3, 1, 12, 30)));
    assert_eq!(parse_instant("2025-03-01 12:30:00.5"), parse_instant("2025-03-01T12:30:00.5Z"));
}

#[test]
fn parse_instant_reads_bare_date_as_midnight() {
    assert_eq!(parse_instant(" 2025-03-01 "), Some(utc(2025, 3, 1, 0, 0)));
}

#[test]
fn parse_instant_rejects_garbage() {
    assert_eq!(parse_instant("tomorrow"), None);
    assert_eq!(parse_instant(""), None);
}

// =============================================================
// Formatting
// =============================================================

#[test]
fn format_timestamp_shows_unparseable_input_verbatim() {
    assert_eq!(format_timestamp("soon"), "soon");
}

#[test]
fn format_timestamp_uses_day_first_layout() {
    let shown = format_timestamp("2025-03-01T12:30:00Z");
    assert_eq!(shown, format_local(utc(2025, 3, 1, 12, 30)));
    assert_eq!(shown.len(), "01/03/2025, 12:30".len());
}

#[test]
fn to_wire_is_rfc3339_utc_millis() {
    assert_eq!(to_wire(utc(2025, 3, 1, 12, 30)), "2025-03-01T12:30:00.000Z");
}
