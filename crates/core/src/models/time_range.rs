use serde::Serialize;

/// A named, inclusive range of hours. `start > end` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub name: &'static str,
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    pub fn contains(&self, hour: u32) -> bool {
        if self.start <= self.end {
            hour >= self.start && hour <= self.end
        } else {
            hour >= self.start || hour <= self.end
        }
    }
}

/// Number of time buckets in [`TIME_RANGES`].
pub const TIME_BUCKETS: usize = 4;

/// The fixed bucket table. Every hour 0..=23 is covered by exactly one range.
pub const TIME_RANGES: [TimeRange; TIME_BUCKETS] = [
    TimeRange { name: "Morning", start: 5, end: 11 },
    TimeRange { name: "Afternoon", start: 12, end: 16 },
    TimeRange { name: "Evening", start: 17, end: 20 },
    TimeRange { name: "Night", start: 21, end: 4 },
];

/// Day names indexed 0 = Sunday .. 6 = Saturday.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Index of the first range in [`TIME_RANGES`] containing `hour`.
/// Returns `None` for hours outside 0..=23.
pub fn classify_hour(hour: u32) -> Option<usize> {
    if hour > 23 {
        return None;
    }
    TIME_RANGES.iter().position(|r| r.contains(hour))
}
