//! cardsplit - split credit card statements across spending categories
//!
//! This library provides the core functionality for the cardsplit command.
//! A run reads a card export for one statement, skips the transactions the
//! ledger already holds, asks how each new transaction divides across a fixed
//! set of categories and appends the result to a CSV ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, path management and option merging
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, transactions, allocations)
//! - `storage`: CSV ledger storage layer
//! - `services`: Import, reconciliation, allocation prompts and runs
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use cardsplit::config::{CardsplitPaths, ResolvedConfig, RunOptions};
//!
//! let paths = CardsplitPaths::new()?;
//! let config = ResolvedConfig::resolve(&RunOptions::default(), &paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CardsplitError, CardsplitResult};
