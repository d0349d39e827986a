//! Path management for cardsplit
//!
//! Provides XDG-compliant path resolution for configuration, ledgers, and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `CARDSPLIT_HOME` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cardsplit` or `~/.config/cardsplit`
//! 3. Windows: `%APPDATA%\cardsplit`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::CardsplitError;

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "CARDSPLIT_HOME";

/// Manages all paths used by cardsplit
#[derive(Debug, Clone)]
pub struct CardsplitPaths {
    /// Base directory for all cardsplit data
    base_dir: PathBuf,
}

impl CardsplitPaths {
    /// Create a new CardsplitPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CardsplitError> {
        let base_dir = if let Ok(custom) = std::env::var(HOME_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CardsplitPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/cardsplit/ or equivalent)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default ledger directory (~/.config/cardsplit/ledgers/)
    pub fn ledger_dir(&self) -> PathBuf {
        self.base_dir.join("ledgers")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and ledger directories exist
    pub fn ensure_directories(&self) -> Result<(), CardsplitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CardsplitError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.ledger_dir())
            .map_err(|e| CardsplitError::Io(format!("Failed to create ledger directory: {}", e)))?;

        Ok(())
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match BaseDirs::new() {
            Some(dirs) => dirs.home_dir().join(rest.trim_start_matches('/')),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    }
}

/// Resolve the default base directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CardsplitError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join("cardsplit"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| CardsplitError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("cardsplit"))
}

/// Resolve the default base directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CardsplitError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CardsplitError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("cardsplit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CardsplitPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.ledger_dir(), temp_dir.path().join("ledgers"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CardsplitPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.ledger_dir().exists());
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/ledgers"), PathBuf::from("/tmp/ledgers"));
        assert_eq!(expand_home("~other/x"), PathBuf::from("~other/x"));
    }

    #[test]
    fn test_expand_home_tilde() {
        if let Some(dirs) = BaseDirs::new() {
            assert_eq!(expand_home("~/ledgers"), dirs.home_dir().join("ledgers"));
            assert_eq!(expand_home("~"), dirs.home_dir().to_path_buf());
        }
    }
}
