//! Wall-clock interpretation of stored instants and the journal's date formats.

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
    Utc,
};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::CoreError;

/// Format used for display and for the editable date/time field.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

static DISPLAY_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})\s([0-9]{2}):([0-9]{2}):([0-9]{2})$")
        .expect("valid regex")
});
static MINUTE_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})\s([0-9]{2}):([0-9]{2})$").expect("valid regex")
});
static DAY_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("valid regex"));

/// ISO-8601 forms without an offset, read in the wall clock.
const NAIVE_ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// The time zone used to turn stored instants into a calendar day and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallClock {
    /// The system's local time zone.
    System,
    Fixed(FixedOffset),
}

impl WallClock {
    pub fn utc() -> Self {
        WallClock::Fixed(Utc.fix())
    }

    pub fn fixed_minutes(minutes: i32) -> Result<Self, CoreError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(WallClock::Fixed)
            .ok_or_else(|| {
                CoreError::ValidationError(format!("UTC offset of {minutes} minutes is out of range"))
            })
    }

    pub fn to_local(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            WallClock::System => instant.with_timezone(&Local).naive_local(),
            WallClock::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Resolve a local wall-clock time to an instant.
    /// Ambiguous times take the earlier instant; times skipped by a DST jump are `None`.
    pub fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            WallClock::System => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            WallClock::Fixed(offset) => offset
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Day of week, 0 = Sunday .. 6 = Saturday.
    pub fn weekday_index(&self, instant: &DateTime<Utc>) -> usize {
        self.to_local(instant).weekday().num_days_from_sunday() as usize
    }

    pub fn hour(&self, instant: &DateTime<Utc>) -> u32 {
        self.to_local(instant).hour()
    }
}

/// Format an instant as `DD/MM/YYYY HH:MM:SS`.
pub fn format_display(instant: &DateTime<Utc>, clock: &WallClock) -> String {
    clock.to_local(instant).format(DISPLAY_FORMAT).to_string()
}

/// Parse a `DD/MM/YYYY HH:MM:SS` string strictly.
///
/// Each component must describe a real calendar date and time: `31/02/2024 10:00:00`
/// is rejected rather than rolled over into March.
pub fn parse_display(input: &str, clock: &WallClock) -> Result<DateTime<Utc>, CoreError> {
    let trimmed = input.trim();
    numeric_fields(&DISPLAY_DATETIME, trimmed)
        .and_then(|f| local_instant(clock, f[0], f[1], f[2], f[3], f[4], f[5]))
        .ok_or_else(|| CoreError::InvalidDate(trimmed.to_string()))
}

/// Parse a date from an imported file.
///
/// Tried in order: `DD/MM/YYYY HH:MM:SS`, `DD/MM/YYYY HH:MM` (seconds default to 0),
/// RFC 3339 and other ISO-8601 forms, then `DD/MM/YYYY` at local noon.
pub fn parse_import_date(input: &str, clock: &WallClock) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(instant) = parse_display(s, clock) {
        return Some(instant);
    }

    if let Some(f) = numeric_fields(&MINUTE_DATETIME, s) {
        return local_instant(clock, f[0], f[1], f[2], f[3], f[4], 0);
    }

    if let Some(instant) = parse_iso(s, clock) {
        return Some(instant);
    }

    numeric_fields(&DAY_DATE, s).and_then(|f| local_instant(clock, f[0], f[1], f[2], 12, 0, 0))
}

/// File name for a CSV export made on `date`.
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y-%m-%d"))
}

fn parse_iso(s: &str, clock: &WallClock) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_ISO_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return clock.from_local(&naive);
        }
    }
    // A bare ISO date is midnight UTC.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn local_instant(
    clock: &WallClock,
    day: u32,
    month: u32,
    year: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year as i32, month, day)?.and_hms_opt(hour, minute, second)?;
    clock.from_local(&naive)
}

/// Every capture group of `re` in `input`, as numbers.
fn numeric_fields(re: &Regex, input: &str) -> Option<Vec<u32>> {
    let captures = re.captures(input)?;
    captures
        .iter()
        .skip(1)
        .map(|m| m.and_then(|m| m.as_str().parse().ok()))
        .collect()
}
