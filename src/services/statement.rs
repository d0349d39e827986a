//! Statement run service
//!
//! One run takes the parsed export for a statement, skips what the ledger
//! partition already holds, prompts for an allocation of everything else and
//! appends the completed rows in posting order.

use std::io::{BufRead, Write};

use crate::audit::{AuditEntry, AuditLogger};
use crate::display::format_transaction_details;
use crate::error::CardsplitResult;
use crate::models::{CategorySet, TransactionRecord, TRANSACTION_COLUMNS};
use crate::storage::LedgerStore;

use super::allocation::{AllocationPrompt, PromptOutcome};
use super::reconciliation::{sort_for_ledger, ReconcileStatus, ReconciliationFilter};

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ledger partition the run wrote to
    pub partition: String,
    /// Transactions in the export
    pub parsed: usize,
    /// Distinct transactions already in the partition before the run
    pub recorded: usize,
    /// Export transactions found in the ledger
    pub skipped: usize,
    /// Transactions fully allocated and written
    pub allocated: usize,
    /// New transactions left unallocated when input ended
    pub abandoned: usize,
    /// Ledger cells written
    pub cells_written: usize,
}

/// A run against one partition of a ledger
pub struct StatementRun<'a, L: LedgerStore> {
    ledger: &'a L,
    categories: &'a CategorySet,
    partition: String,
    audit: Option<&'a AuditLogger>,
}

impl<'a, L: LedgerStore> StatementRun<'a, L> {
    /// Create a run for the given ledger partition
    pub fn new(ledger: &'a L, categories: &'a CategorySet, partition: impl Into<String>) -> Self {
        Self {
            ledger,
            categories,
            partition: partition.into(),
            audit: None,
        }
    }

    /// Record appended and skipped transactions in an audit log
    pub fn with_audit(mut self, logger: &'a AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Expected partition header: transaction columns then category codes
    pub fn header(&self) -> Vec<String> {
        TRANSACTION_COLUMNS
            .iter()
            .map(|column| column.to_string())
            .chain(self.categories.iter().map(|c| c.code.clone()))
            .collect()
    }

    /// Reconcile, allocate and append
    ///
    /// Progress and prompts go to the prompt's writer. If input ends part
    /// way, the transactions already allocated are still written and the
    /// rest are counted as abandoned.
    pub fn run<R: BufRead, W: Write>(
        &self,
        records: &[TransactionRecord],
        prompt: &mut AllocationPrompt<R, W>,
    ) -> CardsplitResult<RunSummary> {
        self.ledger.ensure_header(&self.partition, &self.header())?;

        let filter = ReconciliationFilter::new(&self.ledger.read_rows(&self.partition)?);
        writeln!(prompt.output(), "Found {} ledger transactions.", filter.recorded_count())?;

        let mut summary = RunSummary {
            partition: self.partition.clone(),
            parsed: records.len(),
            recorded: filter.recorded_count(),
            ..RunSummary::default()
        };

        let entries = filter.classify(records);
        let total = entries.len();
        let mut audit_entries = Vec::new();
        let mut completed: Vec<(TransactionRecord, Vec<String>)> = Vec::new();

        for (pos, entry) in entries.iter().enumerate() {
            let number = entry.index + 1;

            if entry.status == ReconcileStatus::Recorded {
                writeln!(prompt.output(), "Skipping allocated transaction {} of {}", number, total)?;
                audit_entries.push(AuditEntry::skip(&self.partition, entry.record));
                summary.skipped += 1;
                continue;
            }

            write!(
                prompt.output(),
                "Classify transaction {} of {}\n{}",
                number,
                total,
                format_transaction_details(entry.record)
            )?;

            match prompt.allocate(entry.record, self.categories)? {
                PromptOutcome::Allocated(cells) => completed.push((entry.record.clone(), cells)),
                PromptOutcome::Aborted => {
                    summary.abandoned = entries[pos..]
                        .iter()
                        .filter(|e| e.status == ReconcileStatus::New)
                        .count();
                    log::warn!(
                        "input ended; {} transactions left unallocated",
                        summary.abandoned
                    );
                    break;
                }
            }
        }

        sort_for_ledger(&mut completed);
        let rows: Vec<Vec<String>> = completed
            .iter()
            .map(|(record, cells)| {
                let mut row = record.to_row();
                row.extend(cells.iter().cloned());
                row
            })
            .collect();

        if rows.is_empty() {
            writeln!(prompt.output(), "No transactions to write")?;
        } else {
            summary.cells_written = self.ledger.append_rows(&self.partition, &rows)?;
            summary.allocated = rows.len();
            audit_entries.extend(
                completed
                    .iter()
                    .zip(&rows)
                    .map(|((record, _), row)| AuditEntry::append(&self.partition, record, row)),
            );
        }

        if let Some(logger) = self.audit {
            logger.log_batch(&audit_entries)?;
        }

        Ok(summary)
    }
}
