//! Display-zone handling and time formatting
//!
//! All stored timestamps are UTC. User-facing rendering happens in a single
//! fixed display zone (UTC+8, the zone the tracked game servers run on);
//! there is no per-user timezone configuration.

use chrono::{DateTime, FixedOffset, Utc};

/// Offset of the fixed display zone, in seconds east of UTC.
const DISPLAY_OFFSET_SECS: i32 = 8 * 3600;

/// The fixed display zone (UTC+8).
pub fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).expect("display offset in range")
}

/// Convert a stored timestamp into the display zone.
pub fn to_display(t: DateTime<Utc>) -> DateTime<FixedOffset> {
    t.with_timezone(&display_offset())
}

/// Render a timestamp as `YYYY/MM/DD HH:MM:SS` in the display zone.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    to_display(t).format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Render a timestamp as `HH:MM:SS` in the display zone.
pub fn format_clock_time(t: DateTime<Utc>) -> String {
    to_display(t).format("%H:%M:%S").to_string()
}

/// Render a countdown as zero-padded `HH:MM:SS`.
///
/// Non-positive inputs clamp to `00:00:00`.
pub fn format_countdown(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Render a remaining duration in the short `2h 5m 10s` form.
///
/// Leading zero units are omitted; non-positive inputs render as `0s`.
pub fn format_remaining(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Render a respawn interval given in minutes, e.g. `6h` or `1h 30m`.
pub fn format_interval(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
