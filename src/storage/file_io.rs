//! File I/O utilities with atomic writes
//!
//! Provides safe CSV file operations that won't corrupt a ledger on failure.

use std::fs::{self, File};
use std::path::Path;

use crate::error::CardsplitError;

/// A raw CSV row where blank cells read as absent
pub type RawRow = Vec<Option<String>>;

/// Read every record of a CSV file, returning no rows if the file doesn't exist
///
/// Records may have differing lengths. Trailing blank cells are dropped, so a
/// row whose last columns were never filled reads back short.
pub fn read_csv_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>, CardsplitError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| CardsplitError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            CardsplitError::Storage(format!(
                "Failed to parse {} line {}: {}",
                path.display(),
                idx + 1,
                e
            ))
        })?;

        let mut row: RawRow = record
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        while matches!(row.last(), Some(None)) {
            row.pop();
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Write CSV rows to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures.
pub fn write_csv_atomic<P: AsRef<Path>>(path: P, rows: &[Vec<String>]) -> Result<(), CardsplitError> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CardsplitError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| CardsplitError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| CardsplitError::Storage(format!("Failed to serialize row: {}", e)))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| CardsplitError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| CardsplitError::Storage(format!("Failed to sync data: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CardsplitError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
