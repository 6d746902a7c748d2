use serde::{Deserialize, Serialize};

use super::entry::EventType;
use super::time_range::TIME_BUCKETS;

/// Which entries an activity view covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivityFilter {
    #[default]
    All,
    Only(EventType),
}

impl ActivityFilter {
    pub fn matches(&self, event_type: EventType) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Only(t) => *t == event_type,
        }
    }
}

/// Entry counts by day of week and by hour of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySeries {
    pub filter: ActivityFilter,
    /// Indexed 0 = Sunday .. 6 = Saturday
    pub daily: [u32; 7],
    /// Indexed by hour 0..=23
    pub hourly: [u32; 24],
}

/// Headline counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
}

/// Unconditional distribution of one type's own timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDistribution {
    pub event_type: EventType,
    pub day: [u32; 7],
    pub time: [u32; TIME_BUCKETS],
    /// Name of the most frequent day, `None` when the journal is empty
    pub busiest_day: Option<String>,
}

/// All per-type statistics shown alongside the predictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeStatistics {
    pub overview: Overview,
    /// Indexed by `EventType::as_index`
    pub by_type: [TypeDistribution; 2],
    /// Time-bucket counts over every entry
    pub time_of_day: [u32; TIME_BUCKETS],
}

impl OutcomeStatistics {
    pub fn for_type(&self, event_type: EventType) -> &TypeDistribution {
        &self.by_type[event_type.as_index()]
    }

    pub fn is_empty(&self) -> bool {
        self.overview.total == 0
    }
}

/// A labelled series ready to hand to an external chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}
