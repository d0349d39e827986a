//! Configuration module for cardsplit
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - The JSON settings file
//! - Merging command line options over settings

pub mod paths;
pub mod resolve;
pub mod settings;

pub use paths::CardsplitPaths;
pub use resolve::{ResolvedConfig, RunOptions};
pub use settings::{AllocColumn, Settings};
