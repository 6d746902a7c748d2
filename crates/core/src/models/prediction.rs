use serde::{Deserialize, Serialize};

use super::entry::EventType;
use super::time_range::TIME_BUCKETS;

/// First-order transition counts between event types.
///
/// `counts[from][to]` is the number of times an entry of type `from` was
/// immediately followed (chronologically) by an entry of type `to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCounts {
    counts: [[u32; 2]; 2],
    totals: [u32; 2],
}

impl TransitionCounts {
    pub fn record(&mut self, from: EventType, to: EventType) {
        self.counts[from.as_index()][to.as_index()] += 1;
        self.totals[from.as_index()] += 1;
    }

    pub fn count(&self, from: EventType, to: EventType) -> u32 {
        self.counts[from.as_index()][to.as_index()]
    }

    /// Number of transitions leaving `from`.
    pub fn total(&self, from: EventType) -> u32 {
        self.totals[from.as_index()]
    }

    pub fn row(&self, from: EventType) -> TransitionRow {
        TransitionRow {
            from,
            to_win: self.count(from, EventType::Win),
            to_loss: self.count(from, EventType::Loss),
            total: self.total(from),
        }
    }
}

/// The outgoing transitions of a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRow {
    pub from: EventType,
    pub to_win: u32,
    pub to_loss: u32,
    pub total: u32,
}

/// When entries of one type occurred, as day-of-week and time-bucket counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineHistogram {
    /// Indexed 0 = Sunday .. 6 = Saturday
    pub day: [u32; 7],
    /// Indexed by position in `TIME_RANGES`
    pub time: [u32; TIME_BUCKETS],
    pub total: u32,
}

impl TimelineHistogram {
    pub fn record(&mut self, day: usize, bucket: usize) {
        self.day[day] += 1;
        self.time[bucket] += 1;
        self.total += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Raw counts produced from a chronologically sorted entry sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkovAnalysis {
    pub transitions: TransitionCounts,

    /// Type of the chronologically last entry (the current state)
    pub last_type: EventType,

    /// Successor timing per type, indexed by `EventType::as_index`
    pub timelines: [TimelineHistogram; 2],

    /// Number of entries analysed
    pub entry_count: usize,
}

impl MarkovAnalysis {
    pub fn timeline(&self, event_type: EventType) -> &TimelineHistogram {
        &self.timelines[event_type.as_index()]
    }

    /// Transitions out of the current state.
    pub fn last_row(&self) -> TransitionRow {
        self.transitions.row(self.last_type)
    }
}

/// Result of running the transition analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Analysis {
    /// Fewer than two entries: no transitions exist yet.
    InsufficientData { entry_count: usize },
    Ready(MarkovAnalysis),
}

// ── Display-ready predictions ───────────────────────────────────────

/// Probability of the next entry's type, in whole percent.
/// `win_pct + loss_pct == 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePrediction {
    pub given: EventType,
    pub win_pct: u32,
    pub loss_pct: u32,
}

/// The most frequent slot of a histogram and its share of the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSelection {
    pub index: usize,
    pub label: String,
    pub percent: u32,
}

/// Most likely day and time of day for the next entry of one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePrediction {
    pub event_type: EventType,
    pub histogram: TimelineHistogram,
    /// `None` when no entry of this type has been recorded as a successor
    pub most_likely_day: Option<ModeSelection>,
    pub most_likely_time: Option<ModeSelection>,
}

impl TimelinePrediction {
    pub fn has_data(&self) -> bool {
        self.most_likely_day.is_some()
    }
}

/// Everything the prediction panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub last_type: EventType,
    /// Headline sentence naming the current state
    pub info: String,
    /// `None` when the current state has no outgoing transitions
    pub next_type: Option<TypePrediction>,
    /// Indexed by `EventType::as_index`
    pub timelines: [TimelinePrediction; 2],
}

impl PredictionReport {
    pub fn timeline(&self, event_type: EventType) -> &TimelinePrediction {
        &self.timelines[event_type.as_index()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Prediction {
    InsufficientData { message: String },
    Ready(PredictionReport),
}
