use chrono::{DateTime, Utc};

use crate::datetime::{format_display, parse_display, WallClock};
use crate::errors::CoreError;
use crate::models::entry::{Entry, EntryDetails, EventType};

/// A user submission from the entry form, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub event_type: EventType,
    pub description: String,
    /// `DD/MM/YYYY HH:MM:SS` as typed
    pub datetime: String,
}

impl EntryDraft {
    pub fn new(
        event_type: EventType,
        description: impl Into<String>,
        datetime: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            description: description.into(),
            datetime: datetime.into(),
        }
    }
}

/// Validates submissions and applies edits to an entry list.
///
/// Pure business logic on a `Vec<Entry>`; persistence is the caller's job.
pub struct EntryService {
    clock: WallClock,
}

impl EntryService {
    pub fn new(clock: WallClock) -> Self {
        Self { clock }
    }

    /// Check a draft and resolve its description and instant.
    ///
    /// Rules:
    /// - description and date/time must both be non-blank
    /// - date/time must be a real `DD/MM/YYYY HH:MM:SS` moment
    pub fn validate(&self, draft: &EntryDraft) -> Result<(String, DateTime<Utc>), CoreError> {
        let description = draft.description.trim();
        let datetime = draft.datetime.trim();
        if description.is_empty() || datetime.is_empty() {
            return Err(CoreError::ValidationError(
                "Please fill in all fields.".into(),
            ));
        }
        let instant = parse_display(datetime, &self.clock)?;
        Ok((description.to_string(), instant))
    }

    /// Validate a draft and append it as a new entry. Returns the new id.
    pub fn add_entry(&self, entries: &mut Vec<Entry>, draft: &EntryDraft) -> Result<String, CoreError> {
        let (description, datetime) = self.validate(draft)?;
        let entry = Entry::new(draft.event_type, description, datetime);
        let id = entry.id.clone();
        entries.push(entry);
        Ok(id)
    }

    /// Replace type, description and time of the entry with `id`.
    /// The id and position are kept; structured trade data is dropped
    /// because the description it was derived from has been rewritten.
    pub fn update_entry(
        &self,
        entries: &mut [Entry],
        id: &str,
        draft: &EntryDraft,
    ) -> Result<(), CoreError> {
        let (description, datetime) = self.validate(draft)?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;

        *entry = Entry {
            id: entry.id.clone(),
            event_type: draft.event_type,
            description,
            datetime,
            trade_data: None,
        };
        Ok(())
    }

    /// Remove the entry with `id`, returning it.
    pub fn remove_entry(&self, entries: &mut Vec<Entry>, id: &str) -> Result<Entry, CoreError> {
        let idx = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        Ok(entries.remove(idx))
    }

    /// Draft pre-filled from an existing entry, for an edit form.
    pub fn draft_from(&self, entry: &Entry) -> EntryDraft {
        EntryDraft {
            event_type: entry.event_type,
            description: entry.description.clone(),
            datetime: format_display(&entry.datetime, &self.clock),
        }
    }

    pub fn details(&self, entry: &Entry) -> EntryDetails {
        EntryDetails {
            type_label: format!("{} Event", entry.event_type),
            description: entry.description.clone(),
            datetime: format_display(&entry.datetime, &self.clock),
        }
    }

    /// Entries for display: most recently added first.
    pub fn newest_first<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        entries.iter().rev().collect()
    }
}

impl Default for EntryService {
    fn default() -> Self {
        Self::new(WallClock::System)
    }
}
