//! Reconciliation service
//!
//! Decides which transactions of an export still need to be allocated by
//! comparing them against the rows already recorded in the ledger.
//!
//! Some institutions reuse transaction identifiers, so the whole canonical
//! field tuple is compared rather than the identifier alone. This still
//! cannot tell apart two genuinely distinct transactions in the same period
//! that agree on every field (identifier, timestamp, direction, amount,
//! description and memo): the second one is taken as already recorded.

use std::collections::HashSet;

use crate::models::{TransactionRecord, TRANSACTION_COLUMNS};
use crate::storage::RawRow;

/// Outcome of reconciling one export record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// Not in the ledger; must be allocated
    New,
    /// Already recorded; skipped
    Recorded,
}

/// One export record with its reconciliation outcome
#[derive(Debug, Clone)]
pub struct ReconcileEntry<'r> {
    /// Position in the export (0-indexed)
    pub index: usize,
    pub record: &'r TransactionRecord,
    pub status: ReconcileStatus,
}

/// Pad (or cut) a recorded row to the canonical transaction columns
///
/// Ledgers drop trailing blank cells, so a row with no memo comes back one
/// field short; padding restores the absent marker so it still matches.
pub fn pad_row(row: &[Option<String>]) -> RawRow {
    let mut padded: RawRow = row.iter().take(TRANSACTION_COLUMNS.len()).cloned().collect();
    padded.resize(TRANSACTION_COLUMNS.len(), None);
    padded
}

/// Filter comparing export records against recorded ledger rows
#[derive(Debug, Clone, Default)]
pub struct ReconciliationFilter {
    recorded: HashSet<RawRow>,
}

impl ReconciliationFilter {
    /// Build the filter from recorded rows (header already stripped)
    pub fn new(recorded_rows: &[RawRow]) -> Self {
        Self {
            recorded: recorded_rows.iter().map(|row| pad_row(row)).collect(),
        }
    }

    /// Number of distinct recorded transactions
    pub fn recorded_count(&self) -> usize {
        self.recorded.len()
    }

    /// Whether a record already appears in the ledger
    pub fn is_recorded(&self, record: &TransactionRecord) -> bool {
        self.recorded.contains(&record.canonical_fields())
    }

    /// Classify every record, keeping export order
    pub fn classify<'r>(&self, records: &'r [TransactionRecord]) -> Vec<ReconcileEntry<'r>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| ReconcileEntry {
                index,
                record,
                status: if self.is_recorded(record) {
                    ReconcileStatus::Recorded
                } else {
                    ReconcileStatus::New
                },
            })
            .collect()
    }
}

/// Order rows for writing by posting timestamp, oldest first
///
/// The sort is stable, so rows posted at the same instant keep the order in
/// which they were allocated.
pub fn sort_for_ledger<T>(rows: &mut [(TransactionRecord, T)]) {
    rows.sort_by_key(|(record, _)| record.posted());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RawEntry};
    use chrono::DateTime;

    fn record(id: &str, posted: &str, direction: &str, amount: &str, memo: Option<&str>) -> TransactionRecord {
        TransactionRecord::from_raw(RawEntry {
            id: id.into(),
            posted: DateTime::parse_from_rfc3339(posted).unwrap(),
            direction: direction.into(),
            amount: Money::parse(amount).unwrap(),
            description: "N".into(),
            memo: memo.map(String::from),
        })
        .unwrap()
    }

    fn recorded(fields: &[Option<&str>]) -> RawRow {
        fields.iter().map(|f| f.map(String::from)).collect()
    }

    const T1: &str = "2024-11-01T12:00:00+00:00";

    #[test]
    fn test_full_tuple_duplicate_is_skipped() {
        let ledger = vec![recorded(&[Some("A"), Some(T1), Some("CREDIT"), Some("5.00"), Some("N"), None])];
        let filter = ReconciliationFilter::new(&ledger);

        assert!(filter.is_recorded(&record("A", T1, "CREDIT", "5.00", None)));
        assert!(!filter.is_recorded(&record("A", T1, "CREDIT", "5.01", None)));
    }

    #[test]
    fn test_recorded_count_is_distinct() {
        let row = recorded(&[Some("A"), Some(T1), Some("CREDIT"), Some("5.00"), Some("N")]);
        let mut padded = row.clone();
        padded.push(None);
        let filter = ReconciliationFilter::new(&[row.clone(), row, padded]);
        assert_eq!(filter.recorded_count(), 1);
        assert_eq!(ReconciliationFilter::default().recorded_count(), 0);
    }

    #[test]
    fn test_short_row_is_padded() {
        let ledger = vec![recorded(&[Some("A"), Some(T1), Some("CREDIT"), Some("5.00"), Some("N")])];
        let filter = ReconciliationFilter::new(&ledger);

        assert!(filter.is_recorded(&record("A", T1, "CREDIT", "5.00", None)));
        assert!(!filter.is_recorded(&record("A", T1, "CREDIT", "5.00", Some("memo"))));
    }

    #[test]
    fn test_allocation_columns_are_ignored() {
        let ledger = vec![recorded(&[
            Some("A"),
            Some(T1),
            Some("DEBIT"),
            Some("-15.96"),
            Some("N"),
            None,
            Some("10.00"),
            Some("5.96"),
        ])];
        let filter = ReconciliationFilter::new(&ledger);
        assert!(filter.is_recorded(&record("A", T1, "DEBIT", "-15.96", None)));
    }

    #[test]
    fn test_reused_identifier_is_new() {
        let ledger = vec![recorded(&[Some("A"), Some(T1), Some("CREDIT"), Some("123.45"), Some("N")])];
        let filter = ReconciliationFilter::new(&ledger);
        assert!(!filter.is_recorded(&record("A", T1, "CREDIT", "999.99", None)));
    }

    #[test]
    fn test_timestamp_compared_as_text() {
        let ledger = vec![recorded(&[Some("A"), Some(T1), Some("CREDIT"), Some("5.00"), Some("N")])];
        let filter = ReconciliationFilter::new(&ledger);
        // same instant, different offset
        assert!(!filter.is_recorded(&record("A", "2024-11-01T07:00:00-05:00", "CREDIT", "5.00", None)));
    }

    #[test]
    fn test_classify_keeps_export_order() {
        let records = vec![
            record("C", "2024-11-03T12:00:00+00:00", "DEBIT", "-3.00", None),
            record("A", T1, "CREDIT", "5.00", None),
            record("B", "2024-11-02T12:00:00+00:00", "DEBIT", "-2.00", None),
        ];
        let ledger = vec![recorded(&[Some("A"), Some(T1), Some("CREDIT"), Some("5.00"), Some("N")])];
        let filter = ReconciliationFilter::new(&ledger);

        let entries = filter.classify(&records);
        let statuses: Vec<_> = entries.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![ReconcileStatus::New, ReconcileStatus::Recorded, ReconcileStatus::New]
        );
        assert_eq!(entries[2].index, 2);
        assert_eq!(entries[2].record.id(), "B");
    }

    #[test]
    fn test_pad_row() {
        assert_eq!(pad_row(&[]), vec![None; 6]);
        assert_eq!(pad_row(&[Some("A".into())]).len(), 6);
        assert_eq!(pad_row(&vec![Some("x".to_string()); 9]).len(), 6);
    }

    #[test]
    fn test_sort_for_ledger() {
        let mut rows = vec![
            (record("C", "2024-11-03T12:00:00+00:00", "DEBIT", "-3.00", None), 3),
            (record("A", T1, "CREDIT", "5.00", None), 1),
            (record("B", "2024-11-02T12:00:00+00:00", "DEBIT", "-2.00", None), 2),
            (record("A2", T1, "CREDIT", "6.00", None), 4),
        ];
        sort_for_ledger(&mut rows);
        let order: Vec<_> = rows.iter().map(|(_, n)| *n).collect();
        assert_eq!(order, vec![1, 4, 2, 3]);
    }
}
