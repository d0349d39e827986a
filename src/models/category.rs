//! Category set model
//!
//! The category set is the fixed, ordered list of allocation buckets for a
//! run. Its order defines the ledger's allocation columns, so it is built once
//! from configuration and then only ever borrowed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{CardsplitError, CardsplitResult};

/// Token the operator types to ask for category descriptions
pub const DESCRIBE_TOKEN: &str = "?";

/// A single allocation bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Short code typed at the prompt and used as the ledger column header
    pub code: String,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Create a category without a description
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: None,
        }
    }

    /// Create a category with a description
    pub fn with_description(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: Some(description.into()),
        }
    }

    /// Validate that the code can be typed as a single prompt token
    pub fn validate_code(code: &str) -> CardsplitResult<()> {
        if code.is_empty() || code == DESCRIBE_TOKEN || code.chars().any(char::is_whitespace) {
            return Err(CardsplitError::InvalidCategory(code.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// The ordered set of allocation categories for a run
///
/// `CategorySet::default()` is the uninitialized set: it holds no categories
/// and refuses to back an allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Build a category set, enforcing at least two unique, typeable codes
    pub fn new(categories: Vec<Category>) -> CardsplitResult<Self> {
        if categories.len() < 2 {
            return Err(CardsplitError::TooFewCategories(categories.len()));
        }

        let mut seen = HashSet::new();
        for category in &categories {
            Category::validate_code(&category.code)?;
            if !seen.insert(category.code.as_str()) {
                return Err(CardsplitError::DuplicateCategory(category.code.clone()));
            }
        }

        Ok(Self { categories })
    }

    /// Build a category set from bare codes (no descriptions)
    pub fn from_codes<I, S>(codes: I) -> CardsplitResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(codes.into_iter().map(Category::new).collect())
    }

    /// Parse a colon delimited list such as `ap:pc:af`
    pub fn parse_codes(list: &str) -> CardsplitResult<Self> {
        Self::from_codes(list.split(':').map(str::trim))
    }

    /// Whether the set was ever established
    pub fn is_initialized(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if the set is empty (uninitialized)
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate categories in column order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Category codes in column order
    pub fn codes(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.code.as_str()).collect()
    }

    /// Column index of a category code
    pub fn position(&self, code: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.code == code)
    }

    /// Check if a code belongs to the set
    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    /// Whether any category carries a long description
    pub fn has_descriptions(&self) -> bool {
        self.categories.iter().any(|c| c.description.is_some())
    }

    /// Look up the description of a category
    pub fn description(&self, code: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.code == code)
            .and_then(|c| c.description.as_deref())
    }
}
