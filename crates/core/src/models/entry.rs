use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome class of a journal entry.
///
/// The serialized tags are part of the stored-data schema and must not change:
/// `"received"` for a win and `"paid"` for a loss. `"win"` / `"loss"` are
/// accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventType {
    /// A winning trade
    #[serde(rename = "received", alias = "win")]
    Win = 0,
    /// A losing trade
    #[serde(rename = "paid", alias = "loss")]
    Loss = 1,
}

impl EventType {
    /// Both types in index order.
    pub const ALL: [EventType; 2] = [Self::Win, Self::Loss];

    /// Zero-based index, matches the `#[repr(u8)]` discriminant.
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Stored tag for this type.
    pub fn tag(self) -> &'static str {
        match self {
            EventType::Win => "received",
            EventType::Loss => "paid",
        }
    }

    /// Outcome label used in CSV rows and details.
    pub fn outcome_label(self) -> &'static str {
        match self {
            EventType::Win => "Win",
            EventType::Loss => "Loss",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.outcome_label())
    }
}

/// Structured trade fields attached to imported entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeData {
    /// Instrument identifier (e.g., "GBPUSD")
    pub asset: String,

    /// Signed profit/loss of the trade
    #[serde(rename = "pnL")]
    pub pnl: f64,

    /// Risk multiple as typed by the user (e.g., "1.5"), empty when unknown
    #[serde(default)]
    pub risk: String,

    /// Outcome label ("Win" / "Loss" or the CSV text)
    #[serde(default)]
    pub outcome: String,

    /// Free-text tags
    #[serde(default)]
    pub tags: String,
}

/// A single logged win/loss occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, never changes after creation
    pub id: String,

    /// Win or Loss
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Free-text description
    pub description: String,

    /// When the event happened (absolute instant, ISO-8601 on disk)
    pub datetime: DateTime<Utc>,

    /// Structured trade fields, present on entries created by CSV import
    #[serde(rename = "tradeData", default, skip_serializing_if = "Option::is_none")]
    pub trade_data: Option<TradeData>,
}

/// What an entry carries besides its type and time.
///
/// Entries created before structured trade data existed only have a
/// description; those are parsed with
/// [`extract_legacy`](crate::services::csv_service::extract_legacy).
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload<'a> {
    Structured(&'a TradeData),
    LegacyText(&'a str),
}

impl Entry {
    pub fn new(
        event_type: EventType,
        description: impl Into<String>,
        datetime: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_type,
            description: description.into(),
            datetime,
            trade_data: None,
        }
    }

    /// Create an entry with structured trade data attached.
    pub fn with_trade_data(
        event_type: EventType,
        description: impl Into<String>,
        datetime: DateTime<Utc>,
        trade_data: TradeData,
    ) -> Self {
        Self {
            trade_data: Some(trade_data),
            ..Self::new(event_type, description, datetime)
        }
    }

    pub fn payload(&self) -> EventPayload<'_> {
        match &self.trade_data {
            Some(data) => EventPayload::Structured(data),
            None => EventPayload::LegacyText(&self.description),
        }
    }
}

/// Display projection of an entry for a details dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDetails {
    /// "Win Event" or "Loss Event"
    pub type_label: String,
    pub description: String,
    /// `DD/MM/YYYY HH:MM:SS` in the viewer's wall clock
    pub datetime: String,
}
