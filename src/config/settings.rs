//! User settings for cardsplit
//!
//! Settings live in a JSON file and supply defaults for anything not given
//! on the command line: where ledgers are kept, which ledger to write to, and
//! the allocation categories with their descriptions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::CardsplitPaths;
use crate::error::{CardsplitError, CardsplitResult};
use crate::models::{Category, CategorySet};

/// One allocation column as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllocColumn {
    /// Short code typed at the prompt and used as the column header
    pub short: String,
    /// Long description shown for `?`
    pub long: String,
}

/// User settings for cardsplit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory holding ledgers (defaults to the data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_dir: Option<String>,

    /// Ledger to append to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Allocation categories in column order
    #[serde(default)]
    pub alloc_columns: Vec<AllocColumn>,

    /// Accepted so older config files still load; never used or written
    #[serde(default, skip_serializing)]
    pub credential_dir: Option<serde_json::Value>,

    #[serde(default, skip_serializing)]
    pub bank_id: Option<serde_json::Value>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            ledger_dir: None,
            document_id: None,
            alloc_columns: Vec::new(),
            credential_dir: None,
            bank_id: None,
        }
    }
}

impl Settings {
    /// Load and validate settings from a specific file
    pub fn load(path: &Path) -> CardsplitResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CardsplitError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            CardsplitError::Config(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })?;

        settings.validate().map_err(|e| {
            CardsplitError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        if settings.credential_dir.is_some() || settings.bank_id.is_some() {
            log::debug!("ignoring credential_dir and bank_id in {}", path.display());
        }

        Ok(settings)
    }

    /// Load settings from the default location, or defaults if there is no file
    pub fn load_or_default(paths: &CardsplitPaths) -> CardsplitResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load(&settings_path)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CardsplitPaths) -> CardsplitResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CardsplitError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            CardsplitError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check the allocation columns, when any are configured
    pub fn validate(&self) -> CardsplitResult<()> {
        if self.alloc_columns.is_empty() {
            return Ok(());
        }
        if let Some(column) = self.alloc_columns.iter().find(|c| c.long.trim().is_empty()) {
            return Err(CardsplitError::Config(format!(
                "Allocation column '{}' is missing a description",
                column.short
            )));
        }
        self.category_set().map(|_| ())
    }

    /// Ledger directory from the config file, with `~` expanded
    pub fn ledger_dir(&self) -> Option<PathBuf> {
        self.ledger_dir.as_deref().map(super::paths::expand_home)
    }

    /// Build the category set described by the config file
    ///
    /// Returns the uninitialized set when no columns are configured.
    pub fn category_set(&self) -> CardsplitResult<CategorySet> {
        if self.alloc_columns.is_empty() {
            return Ok(CategorySet::default());
        }
        CategorySet::new(
            self.alloc_columns
                .iter()
                .map(|c| Category::with_description(c.short.clone(), c.long.clone()))
                .collect(),
        )
    }
}
