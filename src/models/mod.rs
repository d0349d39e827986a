//! Core data models for cardsplit
//!
//! This module contains the data structures shared by reconciliation and
//! allocation: money, the category set, transaction records, and the
//! per-transaction allocation state.

pub mod allocation;
pub mod category;
pub mod money;
pub mod transaction;

pub use allocation::Allocation;
pub use category::{Category, CategorySet, DESCRIBE_TOKEN};
pub use money::{Money, MoneyParseError};
pub use transaction::{Direction, RawEntry, TransactionRecord, TRANSACTION_COLUMNS};
