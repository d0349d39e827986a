//! Storage layer for cardsplit
//!
//! Ledgers are plain CSV files so they can be opened in any spreadsheet
//! program. All writes go through a temp file and an atomic rename.

pub mod file_io;
pub mod ledger;

pub use file_io::RawRow;
pub use ledger::{CsvLedger, LedgerStore};
