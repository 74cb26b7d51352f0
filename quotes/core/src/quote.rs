//! Quotes and the Catalog
//!
//! A [`Catalog`] is the fixed, ordered set of quotes the selector rotates
//! through. It is validated once at construction (never empty) and shared
//! cheaply afterwards; nothing mutates it after startup.
//!
//! # Catalog Files
//!
//! ```toml
//! [[quote]]
//! text = "Fix the cause, not the symptom."
//! author = "Steve Maguire"
//!
//! [[quote]]
//! text = "Code is like humor. When you have to explain it, it's bad."
//! author = "Cory House"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{QuoteError, Result};

/// A single immutable quote
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// The quoted words
    pub text: String,
    /// Who said them
    pub author: String,
}

impl Quote {
    /// Create a new quote
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.author)
    }
}

/// Quotes shipped with the widget
const BUILTIN_QUOTES: &[(&str, &str)] = &[
    (
        "The best way to predict the future is to invent it.",
        "Alan Kay",
    ),
    (
        "The best way to predict your future is to create it.",
        "Abraham Lincoln",
    ),
    ("Fix the cause, not the symptom.", "Steve Maguire"),
    (
        "The most dangerous phrase in the language is, \u{2018}We\u{2019}ve always done it this way.\u{2019}",
        "Buddha",
    ),
    (
        "In the beginner\u{2019}s mind, there are many possibilities; in the expert\u{2019}s mind, there are few.",
        "Shunryu Suzuki",
    ),
    (
        "You might not think that programmers are artists, but programming is an extremely creative profession. It\u{2019}s logic-based creativity.",
        "John Romero",
    ),
    (
        "Code is like humor. When you have to explain it, it\u{2019}s bad.",
        "Cory House",
    ),
];

/// Errors that can occur when loading a catalog file
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file
    #[error("Failed to read catalog at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The file parsed but does not describe a usable catalog
    #[error(transparent)]
    Invalid(#[from] QuoteError),
}

/// On-disk shape of a catalog file
#[derive(Debug, Default, Deserialize)]
struct CatalogToml {
    #[serde(default, rename = "quote")]
    quotes: Vec<Quote>,
}

/// The fixed, ordered, non-empty set of available quotes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    quotes: Arc<[Quote]>,
}

impl Catalog {
    /// Build a catalog, rejecting an empty quote list
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidCatalog`] when `quotes` is empty.
    pub fn new(quotes: Vec<Quote>) -> Result<Self> {
        if quotes.is_empty() {
            return Err(QuoteError::InvalidCatalog("catalog is empty".into()));
        }
        Ok(Self {
            quotes: quotes.into(),
        })
    }

    /// The catalog shipped with the widget
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            quotes: BUILTIN_QUOTES
                .iter()
                .map(|(text, author)| Quote::new(*text, *author))
                .collect(),
        }
    }

    /// Parse a catalog from TOML source
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or lists no quotes.
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, CatalogError> {
        let parsed: CatalogToml = toml::from_str(source)?;
        Ok(Self::new(parsed.quotes)?)
    }

    /// Load a catalog file from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or is empty.
    pub fn load(path: &Path) -> std::result::Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog = Self::from_toml_str(&source)?;

        tracing::info!(
            path = %path.display(),
            quotes = catalog.len(),
            "Loaded quote catalog"
        );

        Ok(catalog)
    }

    /// Number of quotes
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quote at a catalog position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    /// All quotes in catalog order
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Iterate quotes in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
