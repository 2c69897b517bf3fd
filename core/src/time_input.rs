//! Loose kill-time input parsing
//!
//! Users type kill times in whatever shape is fastest: compact digit runs,
//! bare clock times, month/day prefixes, or a full date-time literal. Input
//! is interpreted in the fixed display zone against a caller-supplied "now"
//! (missing calendar fields default to the current date and year), and every
//! numeric field is range-checked; a pattern whose fields fall outside their
//! natural range is skipped and the next one is tried.
//!
//! # Accepted patterns (first match wins)
//!
//! 1. `HHMMSS` - six digits, today's date
//! 2. `MMDDHHMMSS` - ten digits, current year
//! 3. Date-time literals - RFC 3339 or year-first `YYYY-MM-DD HH:MM[:SS]`
//! 4. `MM/DD HH:MM[:SS]` - current year
//! 5. `HH:MM[:SS]` - today's date

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

use crate::clock::display_offset;

#[cfg(test)]
mod tests;

/// Accepted input patterns, one line each, for user-facing format hints.
pub const ACCEPTED_FORMATS: &[&str] = &[
    "HHMMSS            e.g. 143045",
    "MMDDHHMMSS        e.g. 1225143045",
    "HH:MM[:SS]        e.g. 14:30 or 14:30:45",
    "MM/DD HH:MM[:SS]  e.g. 12/25 14:30",
    "date-time literal e.g. 2024-12-25 14:30:45",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("unrecognized time format: {input:?}")]
    Unrecognized { input: String },
}

/// Parse a loose time string into an absolute instant.
///
/// The result may lie in the future or the far past relative to `now`;
/// callers that record kills run it through cycle reconciliation afterwards.
pub fn parse_time_input(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeParseError> {
    let text = input.trim();
    let today = now.with_timezone(&display_offset()).date_naive();

    parse_compact_digits(text, today)
        .or_else(|| parse_datetime_literal(text))
        .or_else(|| parse_month_day_time(text, today.year()))
        .or_else(|| parse_clock_time(text, today))
        .ok_or_else(|| TimeParseError::Unrecognized {
            input: text.to_string(),
        })
}

/// Interpret a wall-clock date-time in the display zone.
fn from_display(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    naive
        .and_local_timezone(display_offset())
        .single()
        .map(|t| t.with_timezone(&Utc))
}

/// Patterns 1 and 2: all-digit runs of exactly six (`HHMMSS`) or ten
/// (`MMDDHHMMSS`) digits. Any other digit run falls through.
fn parse_compact_digits(text: &str, today: NaiveDate) -> Option<DateTime<Utc>> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let naive = match text.len() {
        6 => {
            let time = hms(&text[0..2], &text[2..4], &text[4..6])?;
            today.and_time(time)
        }
        10 => {
            let month: u32 = text[0..2].parse().ok()?;
            let day: u32 = text[2..4].parse().ok()?;
            let time = hms(&text[4..6], &text[6..8], &text[8..10])?;
            NaiveDate::from_ymd_opt(today.year(), month, day)?.and_time(time)
        }
        _ => return None,
    };

    from_display(naive)
}

/// Pattern 3: unambiguous date-time literals. RFC 3339 carries its own
/// offset; the year-first forms are read as display-zone wall-clock times.
fn parse_datetime_literal(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .and_then(from_display)
}

/// Pattern 4: `MM/DD HH:MM[:SS]` in the current year. There is no year
/// rollover logic; a "future" date is handled by cycle reconciliation.
fn parse_month_day_time(text: &str, year: i32) -> Option<DateTime<Utc>> {
    let (date_part, time_part) = text.split_once(char::is_whitespace)?;
    let (month, day) = date_part.split_once('/')?;
    let month = field(month, 1, 2)?;
    let day = field(day, 1, 2)?;
    let time = clock_fields(time_part.trim_start())?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    from_display(date.and_time(time))
}

/// Pattern 5: bare `HH:MM[:SS]` on today's date.
fn parse_clock_time(text: &str, today: NaiveDate) -> Option<DateTime<Utc>> {
    let time = clock_fields(text)?;
    from_display(today.and_time(time))
}

/// `H:MM`, `HH:MM`, or either with a `:SS` tail. Minutes and seconds are
/// fixed two-digit fields; the hour may drop its leading zero.
fn clock_fields(text: &str) -> Option<NaiveTime> {
    let mut parts = text.split(':');
    let hour = field(parts.next()?, 1, 2)?;
    let minute = field(parts.next()?, 2, 2)?;
    let second = match parts.next() {
        Some(s) => field(s, 2, 2)?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Parse an all-digit field whose width lies within `min..=max`.
fn field(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn hms(h: &str, m: &str, s: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, s.parse().ok()?)
}
