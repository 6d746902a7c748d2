use thiserror::Error;

/// Unified error type for the entire trade-journal-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Invalid date/time '{0}': expected DD/MM/YYYY HH:MM:SS (e.g., 09/11/2025 14:30:00)")]
    InvalidDate(String),

    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Entry validation failed: {0}")]
    ValidationError(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
