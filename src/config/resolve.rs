//! Run configuration resolution
//!
//! Merges command line options with the config file. Command line values
//! always win; the config file only fills in what was not given.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::paths::{expand_home, CardsplitPaths};
use super::settings::Settings;
use crate::error::{CardsplitError, CardsplitResult};
use crate::models::CategorySet;

/// Ledger used when neither the command line nor the config file names one
pub const DEFAULT_DOCUMENT_ID: &str = "CreditCardTransactions";

/// Options a run can take from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub ledger_dir: Option<PathBuf>,
    pub document_id: Option<String>,
    pub alloc_columns: Option<String>,
    pub config_file: Option<PathBuf>,
}

/// Everything a run needs, after merging all sources
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub ledger_dir: PathBuf,
    pub document_id: String,
    pub categories: CategorySet,
}

impl ResolvedConfig {
    /// Resolve against the settings file
    ///
    /// An explicit `--config-file` must exist and be valid. Without one, the
    /// default settings file is used when present.
    pub fn resolve(options: &RunOptions, paths: &CardsplitPaths) -> CardsplitResult<Self> {
        let settings = match &options.config_file {
            Some(path) => Settings::load(path)?,
            None => Settings::load_or_default(paths)?,
        };
        Self::merge(options, &settings, paths)
    }

    /// Merge options over already loaded settings
    pub fn merge(
        options: &RunOptions,
        settings: &Settings,
        paths: &CardsplitPaths,
    ) -> CardsplitResult<Self> {
        let categories = match &options.alloc_columns {
            Some(list) => parse_alloc_columns(list)?,
            None => settings.category_set()?,
        };
        if !categories.is_initialized() {
            return Err(CardsplitError::Config(
                "Allocation columns unknown: pass --alloc-columns or set alloc_columns in the config file".into(),
            ));
        }

        let ledger_dir = options
            .ledger_dir
            .clone()
            .or_else(|| settings.ledger_dir())
            .unwrap_or_else(|| paths.ledger_dir());

        let document_id = options
            .document_id
            .clone()
            .or_else(|| settings.document_id.clone())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_ID.to_string());
        validate_document_id(&document_id)?;

        Ok(Self {
            ledger_dir,
            document_id,
            categories,
        })
    }
}

/// Parse a colon delimited category list such as `ap:pc:af`
pub fn parse_alloc_columns(list: &str) -> CardsplitResult<CategorySet> {
    CategorySet::parse_codes(list).map_err(|e| {
        CardsplitError::Config(format!("Invalid allocation columns '{}': {}", list, e))
    })
}

/// Validate a statement date in `YYYYMMDD` form
///
/// The date names the ledger partition, so the original text is kept.
pub fn parse_statement_date(text: &str) -> CardsplitResult<String> {
    if text.len() != 8 || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(CardsplitError::Validation(format!(
            "Invalid statement date '{}': expected YYYYMMDD",
            text
        )));
    }
    NaiveDate::parse_from_str(text, "%Y%m%d").map_err(|e| {
        CardsplitError::Validation(format!("Invalid statement date '{}': {}", text, e))
    })?;
    Ok(text.to_string())
}

/// Validate that an export file exists
pub fn validate_export_file(text: &str) -> CardsplitResult<PathBuf> {
    let path = expand_home(text);
    if !path.is_file() {
        return Err(CardsplitError::Validation(format!(
            "Export file not found: {}",
            path.display()
        )));
    }
    Ok(path)
}

/// Ledger names become directory names
fn validate_document_id(document_id: &str) -> CardsplitResult<()> {
    let valid = !document_id.is_empty()
        && document_id != "."
        && document_id != ".."
        && !document_id.contains(['/', '\\'])
        && Path::new(document_id).file_name().is_some();
    if valid {
        Ok(())
    } else {
        Err(CardsplitError::Config(format!(
            "Invalid document id '{}'",
            document_id
        )))
    }
}
