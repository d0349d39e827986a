//! Ledger storage
//!
//! A ledger is a named collection of partitions, one per statement date.
//! Each partition starts with a header row (the transaction columns followed
//! by the allocation category codes) and accumulates fully allocated rows.

use std::path::{Path, PathBuf};

use crate::error::{CardsplitError, CardsplitResult};

use super::file_io::{read_csv_rows, write_csv_atomic, RawRow};

/// Reading and appending ledger rows for one partition at a time
pub trait LedgerStore {
    /// The header row of a partition, if it has one
    fn read_header(&self, partition: &str) -> CardsplitResult<Option<Vec<String>>>;

    /// Previously recorded rows, header stripped and short rows left short
    fn read_rows(&self, partition: &str) -> CardsplitResult<Vec<RawRow>>;

    /// Write the header of an empty partition
    fn write_header(&self, partition: &str, header: &[String]) -> CardsplitResult<()>;

    /// Append rows after the existing ones, returning the number of cells written
    fn append_rows(&self, partition: &str, rows: &[Vec<String>]) -> CardsplitResult<usize>;

    /// Check the partition header, creating it when the partition is empty
    fn ensure_header(&self, partition: &str, expected: &[String]) -> CardsplitResult<()> {
        match self.read_header(partition)? {
            None => self.write_header(partition, expected),
            Some(header) if header == expected => Ok(()),
            Some(header) => Err(CardsplitError::HeaderMismatch {
                got: header.join(", "),
                expected: expected.join(", "),
            }),
        }
    }
}

/// A ledger kept as one CSV file per partition
///
/// Files live at `<ledger_dir>/<document_id>/<partition>.csv`.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    root: PathBuf,
}

impl CsvLedger {
    /// Open (without creating) the ledger named `document_id`
    pub fn new(ledger_dir: &Path, document_id: &str) -> Self {
        Self {
            root: ledger_dir.join(document_id),
        }
    }

    /// Path to a partition file
    pub fn partition_path(&self, partition: &str) -> PathBuf {
        self.root.join(format!("{}.csv", partition))
    }

    fn read_all(&self, partition: &str) -> CardsplitResult<Vec<RawRow>> {
        read_csv_rows(self.partition_path(partition))
    }
}

fn to_cells(row: RawRow) -> Vec<String> {
    row.into_iter().map(Option::unwrap_or_default).collect()
}

impl LedgerStore for CsvLedger {
    fn read_header(&self, partition: &str) -> CardsplitResult<Option<Vec<String>>> {
        Ok(self.read_all(partition)?.into_iter().next().map(to_cells))
    }

    fn read_rows(&self, partition: &str) -> CardsplitResult<Vec<RawRow>> {
        Ok(self.read_all(partition)?.into_iter().skip(1).collect())
    }

    fn write_header(&self, partition: &str, header: &[String]) -> CardsplitResult<()> {
        if !self.read_all(partition)?.is_empty() {
            return Err(CardsplitError::Ledger(format!(
                "Partition {} already has a header",
                partition
            )));
        }
        write_csv_atomic(self.partition_path(partition), &[header.to_vec()])
    }

    fn append_rows(&self, partition: &str, rows: &[Vec<String>]) -> CardsplitResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let existing = self.read_all(partition)?;
        if existing.is_empty() {
            return Err(CardsplitError::Ledger(format!(
                "Partition {} has no header",
                partition
            )));
        }

        let mut all: Vec<Vec<String>> = existing.into_iter().map(to_cells).collect();
        all.extend(rows.iter().cloned());
        write_csv_atomic(self.partition_path(partition), &all)?;

        log::debug!(
            "appended {} rows to {}",
            rows.len(),
            self.partition_path(partition).display()
        );
        Ok(rows.iter().map(Vec::len).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn header() -> Vec<String> {
        ["ID", "POSTED", "TYPE", "AMOUNT", "NAME", "MEMO", "ap", "pc"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(id: &str, memo: &str, ap: &str) -> Vec<String> {
        [id, "2024-11-05T12:00:00+00:00", "DEBIT", "-15.96", "Store", memo, ap, ""]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn create_ledger() -> (TempDir, CsvLedger) {
        let temp_dir = TempDir::new().unwrap();
        let ledger = CsvLedger::new(temp_dir.path(), "household");
        (temp_dir, ledger)
    }

    #[test]
    fn test_empty_partition() {
        let (_temp, ledger) = create_ledger();
        assert!(ledger.read_header("20241126").unwrap().is_none());
        assert!(ledger.read_rows("20241126").unwrap().is_empty());
        assert!(!ledger.partition_path("20241126").exists());
    }

    #[test]
    fn test_ensure_header_creates_then_accepts() {
        let (_temp, ledger) = create_ledger();
        ledger.ensure_header("20241126", &header()).unwrap();
        assert_eq!(ledger.read_header("20241126").unwrap(), Some(header()));

        ledger.ensure_header("20241126", &header()).unwrap();
        assert!(ledger.partition_path("20241126").exists());
    }

    #[test]
    fn test_ensure_header_mismatch() {
        let (_temp, ledger) = create_ledger();
        ledger.ensure_header("20241126", &header()).unwrap();

        let mut other = header();
        other[7] = "af".to_string();
        let err = ledger.ensure_header("20241126", &other).unwrap_err();
        assert!(matches!(err, CardsplitError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_append_and_read_rows() {
        let (_temp, ledger) = create_ledger();
        ledger.ensure_header("20241126", &header()).unwrap();

        let cells = ledger
            .append_rows("20241126", &[row("A", "", "15.96")])
            .unwrap();
        assert_eq!(cells, 8);

        ledger.append_rows("20241126", &[row("B", "note", "")]).unwrap();

        let rows = ledger.read_rows("20241126").unwrap();
        assert_eq!(rows.len(), 2);
        // blank memo in the middle of the row stays in place
        assert_eq!(rows[0][5], None);
        assert_eq!(rows[0][6].as_deref(), Some("15.96"));
        // trailing blanks are dropped
        assert_eq!(rows[1].len(), 6);
        assert_eq!(rows[1][0].as_deref(), Some("B"));
    }

    #[test]
    fn test_append_requires_header() {
        let (_temp, ledger) = create_ledger();
        assert!(ledger.append_rows("20241126", &[row("A", "", "1")]).is_err());
        assert_eq!(ledger.append_rows("20241126", &[]).unwrap(), 0);
    }
}
