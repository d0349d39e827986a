//! Transaction record model
//!
//! Represents a single entry of a bank export after validation. Records are
//! immutable: they are built once from a parsed entry and then only read,
//! either to reconcile against the ledger or to seed an allocation.
//!
//! Amounts follow the export's signing convention, which is from the
//! cardholder's point of view: a payment (CREDIT) is non-negative while a
//! purchase (DEBIT) is non-positive.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::{CardsplitError, CardsplitResult};

/// Canonical ledger columns describing a transaction, in order
pub const TRANSACTION_COLUMNS: [&str; 6] = ["ID", "POSTED", "TYPE", "AMOUNT", "NAME", "MEMO"];

/// Direction of a transaction as reported by the institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Money returned to the card (payments, refunds)
    Credit,
    /// Money charged to the card (purchases, interest)
    Debit,
}

impl Direction {
    /// Wire label used by exports and the ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "CREDIT",
            Self::Debit => "DEBIT",
        }
    }

    /// Check whether an amount follows this direction's signing convention
    pub fn accepts(&self, amount: Money) -> bool {
        match self {
            Self::Credit => !amount.is_negative(),
            Self::Debit => !amount.is_positive(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Only the exact upper-case labels are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT" => Ok(Self::Credit),
            "DEBIT" => Ok(Self::Debit),
            other => Err(other.to_string()),
        }
    }
}

/// An export entry as parsed, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub id: String,
    pub posted: DateTime<FixedOffset>,
    pub direction: String,
    pub amount: Money,
    pub description: String,
    pub memo: Option<String>,
}

/// A validated, immutable transaction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    id: String,
    posted: DateTime<FixedOffset>,
    direction: Direction,
    amount: Money,
    description: String,
    memo: Option<String>,
}

impl TransactionRecord {
    /// Validate a raw entry
    ///
    /// The direction is checked first, then the sign of the amount. Zero
    /// amounts are accepted in either direction.
    pub fn from_raw(raw: RawEntry) -> CardsplitResult<Self> {
        let direction = Direction::from_str(&raw.direction).map_err(|direction| {
            CardsplitError::UnsupportedDirection {
                id: raw.id.clone(),
                direction,
            }
        })?;

        if !direction.accepts(raw.amount) {
            return Err(CardsplitError::sign_mismatch(
                raw.id,
                direction.as_str(),
                raw.amount,
            ));
        }

        Ok(Self {
            id: raw.id,
            posted: raw.posted,
            direction,
            amount: raw.amount,
            description: raw.description,
            memo: raw.memo.filter(|m| !m.is_empty()),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn posted(&self) -> DateTime<FixedOffset> {
        self.posted
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Amount with the export's precision and scale
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    /// Canonical text of the posting timestamp, e.g. `2024-11-01T12:00:00+00:00`
    ///
    /// Reconciliation compares this text rather than the instant, so the
    /// same moment written with another offset is a different transaction.
    pub fn posted_text(&self) -> String {
        self.posted.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    /// The canonical field tuple used for duplicate detection
    ///
    /// Empty text is treated as absent, matching how a blank ledger cell
    /// reads back.
    pub fn canonical_fields(&self) -> Vec<Option<String>> {
        let present = |s: String| if s.is_empty() { None } else { Some(s) };
        vec![
            present(self.id.clone()),
            Some(self.posted_text()),
            Some(self.direction.to_string()),
            Some(self.amount.to_string()),
            present(self.description.clone()),
            self.memo.clone(),
        ]
    }

    /// Ledger cells for the transaction columns (blank for an absent memo)
    pub fn to_row(&self) -> Vec<String> {
        self.canonical_fields()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(direction: &str, amount: &str) -> RawEntry {
        RawEntry {
            id: "Redacted3".into(),
            posted: DateTime::parse_from_rfc3339("2024-11-05T12:00:00+00:00").unwrap(),
            direction: direction.into(),
            amount: Money::parse(amount).unwrap(),
            description: "Transaction 3".into(),
            memo: Some("Memo for Transaction 3".into()),
        }
    }

    #[test]
    fn test_valid_debit() {
        let record = TransactionRecord::from_raw(raw("DEBIT", "-15.96")).unwrap();
        assert_eq!(record.direction(), Direction::Debit);
        assert_eq!(record.amount(), Money::from_cents(-1596));
        assert_eq!(record.memo(), Some("Memo for Transaction 3"));
    }

    #[test]
    fn test_zero_amount_allowed_both_ways() {
        assert!(TransactionRecord::from_raw(raw("DEBIT", "0.0")).is_ok());
        assert!(TransactionRecord::from_raw(raw("CREDIT", "0.00")).is_ok());
    }

    #[test]
    fn test_unsupported_direction() {
        for direction in ["INT", "credit", "", "XFER"] {
            let err = TransactionRecord::from_raw(raw(direction, "1.00")).unwrap_err();
            assert!(matches!(err, CardsplitError::UnsupportedDirection { .. }));
        }
    }

    #[test]
    fn test_direction_checked_before_sign() {
        let err = TransactionRecord::from_raw(raw("FEE", "-1.00")).unwrap_err();
        assert!(matches!(err, CardsplitError::UnsupportedDirection { .. }));
    }

    #[test]
    fn test_negative_credit_rejected() {
        let err = TransactionRecord::from_raw(raw("CREDIT", "-123.45")).unwrap_err();
        assert!(matches!(err, CardsplitError::SignMismatch { .. }));
    }

    #[test]
    fn test_positive_debit_rejected() {
        let err = TransactionRecord::from_raw(raw("DEBIT", "1.96")).unwrap_err();
        assert!(matches!(err, CardsplitError::SignMismatch { .. }));
    }

    #[test]
    fn test_canonical_fields() {
        let mut entry = raw("CREDIT", "8675.30");
        entry.memo = None;
        let record = TransactionRecord::from_raw(entry).unwrap();

        assert_eq!(
            record.canonical_fields(),
            vec![
                Some("Redacted3".to_string()),
                Some("2024-11-05T12:00:00+00:00".to_string()),
                Some("CREDIT".to_string()),
                Some("8675.30".to_string()),
                Some("Transaction 3".to_string()),
                None,
            ]
        );
        assert_eq!(record.to_row()[5], "");
    }

    #[test]
    fn test_empty_memo_is_absent() {
        let mut entry = raw("DEBIT", "-1.00");
        entry.memo = Some(String::new());
        let record = TransactionRecord::from_raw(entry).unwrap();
        assert_eq!(record.memo(), None);
    }
}
