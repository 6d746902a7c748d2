use serde::{Deserialize, Serialize};

use crate::datetime::WallClock;
use crate::errors::CoreError;

/// Storage key used by earlier versions of the journal.
pub const DEFAULT_STORAGE_KEY: &str = "topc_markov_predictions_v1";

/// User-configurable settings for a journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key under which the entry list is stored.
    pub storage_key: String,

    /// Currency symbol written into descriptions of imported trades (e.g., "£").
    pub currency_symbol: String,

    /// Export files are named `{export_prefix}_{YYYY-MM-DD}.csv`.
    pub export_prefix: String,

    /// Fixed offset from UTC in minutes used to read calendar day and hour.
    /// `None` uses the system's local time zone.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: "£".to_string(),
            export_prefix: "trades_export".to_string(),
            utc_offset_minutes: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Storage key must not be empty".into(),
            ));
        }
        self.wall_clock()?;
        Ok(())
    }

    /// The wall clock these settings describe.
    pub fn wall_clock(&self) -> Result<WallClock, CoreError> {
        match self.utc_offset_minutes {
            None => Ok(WallClock::System),
            Some(minutes) => WallClock::fixed_minutes(minutes),
        }
    }
}
