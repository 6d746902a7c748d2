use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::datetime::{format_display, parse_import_date, WallClock};
use crate::errors::CoreError;
use crate::models::entry::{Entry, EventPayload, EventType, TradeData};

/// Header written on export. Imports expect the same column order.
pub const CSV_HEADER: &str = "Date,Asset,P&L,Risk(1R),Outcome,Tags";

/// Appended to the summary of an import that added nothing.
pub const EXPECTED_FORMAT_HINT: &str = "Expected CSV format:\nDate, Asset, P&L, Risk(1R), Outcome, Tags\n\nExample:\n09/11/2025 14:30:00,GBPUSD,150.00,1.5,Win,London Session";

/// Asset name used on export when an entry carries none.
const DEFAULT_ASSET: &str = "Trade";

static LEGACY_ASSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^-]+)\s*-").expect("valid regex"));
static LEGACY_PNL: Lazy<Regex> = Lazy::new(|| Regex::new(r"£([-\d.]+)").expect("valid regex"));
static LEGACY_RISK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Risk:\s*([\d.]+)R").expect("valid regex"));
static LEGACY_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"Tags:\s*(.+)$").expect("valid regex"));

/// Why a CSV row was not imported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("not enough columns")]
    NotEnoughColumns,

    #[error("invalid date format '{0}'")]
    InvalidDate(String),

    #[error("invalid P&L value '{0}'")]
    InvalidPnl(String),

    #[error("breakeven trade (P&L = 0)")]
    Breakeven,
}

/// A row that was skipped, with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: RowError,
}

/// Outcome of parsing a CSV file: the new entries and every skipped row.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub entries: Vec<Entry>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.entries.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// One message covering the whole import.
    pub fn summary(&self) -> String {
        let added = self.imported();
        let skipped = self.skipped_count();
        let trades = if added == 1 { "trade" } else { "trades" };
        let rows = if skipped == 1 { "row" } else { "rows" };
        if added > 0 {
            format!("Import complete! Added {added} {trades}. Skipped {skipped} {rows}.")
        } else {
            format!("Import failed. Added 0 trades. Skipped {skipped} {rows}.\n\n{EXPECTED_FORMAT_HINT}")
        }
    }
}

/// A finished export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    /// `{prefix}_{YYYY-MM-DD}.csv`
    pub file_name: String,
    pub content: String,
    pub count: usize,
}

impl CsvExport {
    pub fn summary(&self) -> String {
        let trades = if self.count == 1 { "trade" } else { "trades" };
        format!("Exported {} {trades} to CSV!", self.count)
    }
}

/// Converts journal entries to and from the `Date,Asset,P&L,Risk(1R),Outcome,Tags` format.
///
/// Fields are split on commas and literal quote characters are stripped;
/// quoted fields containing commas are not supported.
pub struct CsvService {
    clock: WallClock,
    currency_symbol: String,
    /// Matches `{currency_symbol}{pnl}` in descriptions written by this service.
    pnl_pattern: Regex,
}

impl CsvService {
    pub fn new(clock: WallClock, currency_symbol: impl Into<String>) -> Self {
        let currency_symbol = currency_symbol.into();
        let pnl_pattern = Regex::new(&format!(r"{}([-\d.]+)", regex::escape(&currency_symbol)))
            .unwrap_or_else(|_| LEGACY_PNL.clone());
        Self {
            clock,
            currency_symbol,
            pnl_pattern,
        }
    }

    /// [`extract_legacy`] for descriptions written with this service's currency
    /// symbol. `£` is still recognised for records from earlier versions.
    pub fn extract(&self, description: &str) -> Option<TradeData> {
        extract_with(description, &[&self.pnl_pattern, &*LEGACY_PNL])
    }

    /// Parse a whole file. The first line is the header and is skipped.
    ///
    /// Bad rows never fail the import; they are collected in
    /// [`ImportReport::skipped`]. Only a file without any data line is an error.
    pub fn import(&self, csv: &str) -> Result<ImportReport, CoreError> {
        let lines: Vec<&str> = csv.split('\n').map(|l| l.trim_end_matches('\r')).collect();
        if lines.len() < 2 {
            return Err(CoreError::InvalidCsv("CSV file is empty or invalid.".into()));
        }

        let mut report = ImportReport::default();
        for (idx, raw) in lines.iter().enumerate().skip(1) {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match self.parse_row(line) {
                Ok(entry) => report.entries.push(entry),
                Err(reason) => {
                    warn!(line = idx + 1, %reason, "skipping CSV row");
                    report.skipped.push(SkippedRow {
                        line: idx + 1,
                        reason,
                    });
                }
            }
        }

        info!(
            imported = report.imported(),
            skipped = report.skipped_count(),
            "CSV import parsed"
        );
        Ok(report)
    }

    /// Parse one data row into a new entry.
    pub fn parse_row(&self, line: &str) -> Result<Entry, RowError> {
        let columns: Vec<String> = line
            .split(',')
            .map(|c| c.trim().replace('"', ""))
            .collect();
        if columns.len() < 3 {
            return Err(RowError::NotEnoughColumns);
        }

        let column = |i: usize| columns.get(i).map(|c| c.trim()).unwrap_or("");
        let (date_str, asset, pnl_str) = (column(0), column(1), column(2));
        let (risk, outcome, tags) = (column(3), column(4), column(5));

        let datetime = parse_import_date(date_str, &self.clock)
            .ok_or_else(|| RowError::InvalidDate(date_str.to_string()))?;

        let pnl = pnl_str
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RowError::InvalidPnl(pnl_str.to_string()))?;
        if pnl == 0.0 {
            return Err(RowError::Breakeven);
        }

        let event_type = classify_outcome(outcome, pnl);

        let mut description = format!("{asset} - {}{pnl:.2}", self.currency_symbol);
        if !risk.is_empty() {
            description.push_str(&format!(" | Risk: {risk}R"));
        }
        if !tags.is_empty() {
            description.push_str(&format!(" | Tags: {tags}"));
        }

        let outcome = if outcome.is_empty() {
            event_type.outcome_label().to_string()
        } else {
            outcome.to_string()
        };

        Ok(Entry::with_trade_data(
            event_type,
            description,
            datetime,
            TradeData {
                asset: asset.to_string(),
                pnl,
                risk: risk.to_string(),
                outcome,
                tags: tags.to_string(),
            },
        ))
    }

    /// Serialize entries, header first, one row per entry in the given order.
    pub fn export(&self, entries: &[Entry]) -> String {
        let mut csv = String::from(CSV_HEADER);
        for entry in entries {
            csv.push('\n');
            csv.push_str(&self.export_row(entry));
        }
        csv
    }

    pub fn export_row(&self, entry: &Entry) -> String {
        let extracted;
        let data = match entry.payload() {
            EventPayload::Structured(data) => Some(data),
            EventPayload::LegacyText(description) => {
                extracted = self.extract(description);
                extracted.as_ref()
            }
        };

        let (asset, pnl, risk, tags) = match data {
            Some(d) => (
                if d.asset.is_empty() { DEFAULT_ASSET } else { d.asset.as_str() },
                format_pnl(d.pnl),
                d.risk.as_str(),
                d.tags.as_str(),
            ),
            None => (DEFAULT_ASSET, format_pnl(0.0), "", ""),
        };

        format!(
            "{},{},{},{},{},{}",
            format_display(&entry.datetime, &self.clock),
            asset,
            pnl,
            risk,
            entry.event_type.outcome_label(),
            tags,
        )
    }
}

/// Outcome text decides when it says "win" or "loss"; otherwise the sign of the P&L.
fn classify_outcome(outcome: &str, pnl: f64) -> EventType {
    if outcome.eq_ignore_ascii_case("win") {
        EventType::Win
    } else if outcome.eq_ignore_ascii_case("loss") {
        EventType::Loss
    } else if pnl > 0.0 {
        EventType::Win
    } else {
        EventType::Loss
    }
}

fn format_pnl(pnl: f64) -> String {
    if pnl == 0.0 {
        "0.00".to_string()
    } else {
        pnl.to_string()
    }
}

/// Recover trade fields from a description written as
/// `"{asset} - £{pnl} | Risk: {risk}R | Tags: {tags}"`.
///
/// Returns `None` when no field can be found. Missing fields are left empty
/// (P&L defaults to 0).
pub fn extract_legacy(description: &str) -> Option<TradeData> {
    extract_with(description, &[&*LEGACY_PNL])
}

/// The first P&L pattern that matches wins.
fn extract_with(description: &str, pnl_patterns: &[&Regex]) -> Option<TradeData> {
    let asset = capture(&LEGACY_ASSET, description);
    let pnl = pnl_patterns
        .iter()
        .find_map(|re| capture(re, description))
        .and_then(|p| p.parse::<f64>().ok());
    let risk = capture(&LEGACY_RISK, description);
    let tags = capture(&LEGACY_TAGS, description);

    if asset.is_none() && pnl.is_none() && risk.is_none() && tags.is_none() {
        return None;
    }

    Some(TradeData {
        asset: asset.unwrap_or_default(),
        pnl: pnl.unwrap_or(0.0),
        risk: risk.unwrap_or_default(),
        outcome: String::new(),
        tags: tags.unwrap_or_default(),
    })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}
