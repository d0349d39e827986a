//! Export import service
//!
//! Reads a card export in CSV form into validated transaction records.
//! Columns are located by header name, so exports that order their columns
//! differently or add extra ones still import.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use csv::{ReaderBuilder, StringRecord};

use crate::error::{CardsplitError, CardsplitResult};
use crate::models::{Money, RawEntry, TransactionRecord};

const ID_HEADERS: &[&str] = &["fitid", "id"];
const POSTED_HEADERS: &[&str] = &["dtposted", "posted", "date"];
const DIRECTION_HEADERS: &[&str] = &["trntype", "type", "direction"];
const AMOUNT_HEADERS: &[&str] = &["trnamt", "amount"];
const DESCRIPTION_HEADERS: &[&str] = &["name", "description", "payee"];
const MEMO_HEADERS: &[&str] = &["memo", "notes"];

/// Column positions of an export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Index of the institution's transaction identifier
    pub id_column: usize,
    /// Index of the posting timestamp
    pub posted_column: usize,
    /// Index of the CREDIT/DEBIT label
    pub direction_column: usize,
    /// Index of the signed amount
    pub amount_column: usize,
    /// Index of the payee/description
    pub description_column: usize,
    /// Index of the memo, when the export has one
    pub memo_column: Option<usize>,
}

impl ColumnMapping {
    /// Locate the export columns from a header record
    pub fn detect(headers: &StringRecord) -> CardsplitResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias))
        };
        let require = |aliases: &[&str]| {
            find(aliases).ok_or_else(|| {
                CardsplitError::Import(format!(
                    "Export has no {} column (found: {})",
                    aliases.join("/"),
                    normalized.join(", ")
                ))
            })
        };

        Ok(Self {
            id_column: require(ID_HEADERS)?,
            posted_column: require(POSTED_HEADERS)?,
            direction_column: require(DIRECTION_HEADERS)?,
            amount_column: require(AMOUNT_HEADERS)?,
            description_column: require(DESCRIPTION_HEADERS)?,
            memo_column: find(MEMO_HEADERS),
        })
    }
}

/// Service for reading card exports
#[derive(Debug, Clone)]
pub struct ImportService {
    delimiter: u8,
}

impl Default for ImportService {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ImportService {
    /// Create a new import service for comma separated exports
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an export file into records, in file order
    pub fn parse_file(&self, path: &Path) -> CardsplitResult<Vec<TransactionRecord>> {
        let file = File::open(path).map_err(|e| {
            CardsplitError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let records = self.parse_from_reader(file)?;
        log::info!("parsed {} transactions from {}", records.len(), path.display());
        Ok(records)
    }

    /// Parse an export from any reader
    ///
    /// Rows that cannot be read are `Import` errors naming the line; rows
    /// that read but break the direction or sign rules fail with the record
    /// validation error.
    pub fn parse_from_reader<R: Read>(&self, reader: R) -> CardsplitResult<Vec<TransactionRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CardsplitError::Import(format!("Failed to read export header: {}", e)))?
            .clone();
        let mapping = ColumnMapping::detect(&headers)?;

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // header is line 1
            let fallback_line = idx as u64 + 2;
            let record = result.map_err(|e| {
                CardsplitError::Import(format!("Error reading export line {}: {}", fallback_line, e))
            })?;
            let line = record.position().map_or(fallback_line, |p| p.line());

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let entry = parse_record(&record, &mapping)
                .map_err(|e| CardsplitError::Import(format!("Export line {}: {}", line, e)))?;
            records.push(TransactionRecord::from_raw(entry)?);
        }

        Ok(records)
    }
}

/// Parse a single export record
fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> Result<RawEntry, String> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .map(str::trim)
            .ok_or_else(|| format!("Missing {} column", name))
    };

    let id = field(mapping.id_column, "id")?;
    if id.is_empty() {
        return Err("Empty transaction id".to_string());
    }

    let posted_text = field(mapping.posted_column, "posted")?;
    let posted = parse_posted(posted_text)
        .ok_or_else(|| format!("Could not parse timestamp: '{}'", posted_text))?;

    let amount = parse_amount(field(mapping.amount_column, "amount")?)?;

    let memo = mapping
        .memo_column
        .and_then(|col| record.get(col))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from);

    Ok(RawEntry {
        id: id.to_string(),
        posted,
        direction: field(mapping.direction_column, "direction")?.to_string(),
        amount,
        description: field(mapping.description_column, "description")?.to_string(),
        memo,
    })
}

/// Parse an amount, accepting accounting parentheses for negatives
pub fn parse_amount(s: &str) -> Result<Money, String> {
    let s = s.trim();
    let (negate, inner) = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, s),
    };

    let amount = Money::parse(inner).map_err(|e| format!("Could not parse amount '{}': {}", s, e))?;
    if negate {
        if amount.is_negative() {
            return Err(format!("Could not parse amount '{}': double negative", s));
        }
        Ok(-amount)
    } else {
        Ok(amount)
    }
}

/// Parse a posting timestamp
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS+HH:MM`, the OFX compact form
/// (`YYYYMMDDHHMMSS[.XXX][offset:TZ]`, UTC when no zone is given) and bare
/// dates (`YYYY-MM-DD` or `YYYYMMDD`), which are placed at noon UTC.
pub fn parse_posted(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt);
    }
    if let Some(dt) = parse_ofx_timestamp(text) {
        return Some(dt);
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y%m%d"))
        .ok()?;
    let noon = date.and_hms_opt(12, 0, 0)?;
    Some(FixedOffset::east_opt(0)?.from_utc_datetime(&noon))
}

fn parse_ofx_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let (stamp, zone) = match text.split_once('[') {
        Some((stamp, zone)) => (stamp, Some(zone.trim_end_matches(']'))),
        None => (text, None),
    };
    // fractional seconds are dropped
    let stamp = stamp.split('.').next()?;
    if stamp.len() != 14 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%M%S").ok()?;

    let offset = match zone {
        None => FixedOffset::east_opt(0)?,
        Some(zone) => {
            let hours: i32 = zone.split(':').next()?.trim().parse().ok()?;
            FixedOffset::east_opt(hours * 3600)?
        }
    };
    offset.from_local_datetime(&naive).single()
}
