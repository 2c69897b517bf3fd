use super::*;
use chrono::TimeZone;

/// Noon on 2024-06-15 in the display zone (04:00 UTC).
fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 4, 0, 0).unwrap()
}

/// Expected instant for a display-zone wall-clock time.
fn display(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    display_offset()
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
        .with_timezone(&Utc)
}

// compact digit runs

#[test]
fn test_six_digit_compact() {
    let parsed = parse_time_input("143045", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 6, 15, 14, 30, 45));
}

#[test]
fn test_ten_digit_compact() {
    // December must come through as month 12, not an off-by-one index
    let parsed = parse_time_input("1225143045", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 12, 25, 14, 30, 45));
}

#[test]
fn test_six_digit_out_of_range_hour() {
    assert!(parse_time_input("256090", test_now()).is_err());
}

#[test]
fn test_ten_digit_rejects_invalid_calendar_day() {
    // Feb 30 never exists; the date must be rejected, not rolled over
    assert!(parse_time_input("0230120000", test_now()).is_err());
}

#[test]
fn test_other_digit_lengths_fall_through() {
    assert!(parse_time_input("1430", test_now()).is_err());
    assert!(parse_time_input("12251430", test_now()).is_err());
}

// bare clock times

#[test]
fn test_clock_time_without_seconds() {
    let parsed = parse_time_input("14:30", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 6, 15, 14, 30, 0));
}

#[test]
fn test_clock_time_with_seconds() {
    let parsed = parse_time_input("14:30:45", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 6, 15, 14, 30, 45));
}

#[test]
fn test_clock_time_single_digit_hour() {
    let parsed = parse_time_input("8:05", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 6, 15, 8, 5, 0));
}

#[test]
fn test_clock_time_rejects_short_minute() {
    assert!(parse_time_input("14:3", test_now()).is_err());
}

#[test]
fn test_clock_time_rejects_out_of_range_minute() {
    assert!(parse_time_input("14:61", test_now()).is_err());
}

// month/day prefix

#[test]
fn test_month_day_pattern() {
    let parsed = parse_time_input("12/31 23:59", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 12, 31, 23, 59, 0));
}

#[test]
fn test_month_day_with_seconds_and_short_month() {
    let parsed = parse_time_input("7/04 06:30:15", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 7, 4, 6, 30, 15));
}

#[test]
fn test_month_day_stays_in_current_year() {
    // no year rollover; cycle reconciliation deals with the offset later
    let parsed = parse_time_input("01/01 00:30", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 1, 1, 0, 30, 0));
}

#[test]
fn test_month_day_rejects_bad_month() {
    assert!(parse_time_input("13/01 10:00", test_now()).is_err());
}

// date-time literals

#[test]
fn test_datetime_literal() {
    let parsed = parse_time_input("2024-03-01 08:15:30", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 3, 1, 8, 15, 30));
}

#[test]
fn test_datetime_literal_without_seconds() {
    let parsed = parse_time_input("2024-03-01 08:15", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 3, 1, 8, 15, 0));
}

#[test]
fn test_slash_separated_literal() {
    let parsed = parse_time_input("2024/03/01 08:15:30", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 3, 1, 8, 15, 30));
}

#[test]
fn test_rfc3339_keeps_explicit_offset() {
    let parsed = parse_time_input("2024-03-01T08:15:30Z", test_now()).unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 8, 15, 30).unwrap());
}

// rejection

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let parsed = parse_time_input("  143045  ", test_now()).unwrap();
    assert_eq!(parsed, display(2024, 6, 15, 14, 30, 45));
}

#[test]
fn test_unrecognized_input() {
    assert!(parse_time_input("next tuesday", test_now()).is_err());
    assert!(parse_time_input("", test_now()).is_err());
}

#[test]
fn test_error_carries_the_input() {
    let err = parse_time_input("blorp", test_now()).unwrap_err();
    assert!(err.to_string().contains("blorp"));
}
