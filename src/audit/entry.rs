//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TransactionRecord;

/// What a run did with a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Allocated and appended to the ledger
    Append,
    /// Already recorded in the ledger; left alone
    Skip,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Append => write!(f, "APPEND"),
            Operation::Skip => write!(f, "SKIP"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Ledger partition (statement date) the run targeted
    pub partition: String,

    /// Institution identifier of the transaction
    pub transaction_id: String,

    /// Transaction description, for reading the log without the ledger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The ledger row that was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a row appended to the ledger
    pub fn append(partition: impl Into<String>, record: &TransactionRecord, row: &[String]) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Append,
            partition: partition.into(),
            transaction_id: record.id().to_string(),
            description: Some(record.description().to_string()),
            row: serde_json::to_value(row).ok(),
        }
    }

    /// Entry for a transaction skipped as already recorded
    pub fn skip(partition: impl Into<String>, record: &TransactionRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Skip,
            partition: partition.into(),
            transaction_id: record.id().to_string(),
            description: Some(record.description().to_string()),
            row: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.partition,
            self.transaction_id
        );

        if let Some(description) = &self.description {
            output.push_str(&format!(" ({})", description));
        }

        if let Some(serde_json::Value::Array(cells)) = &self.row {
            let cells: Vec<&str> = cells.iter().filter_map(|c| c.as_str()).collect();
            output.push_str(&format!("\n  Row: {}", cells.join(",")));
        }

        output
    }
}
