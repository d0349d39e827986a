//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod categories;
pub mod history;
pub mod import;

pub use categories::{handle_categories_command, CategoriesArgs};
pub use history::handle_history_command;
pub use import::{handle_import_command, ImportArgs, LedgerArgs};
