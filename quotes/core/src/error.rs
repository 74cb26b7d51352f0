//! Error types for the quote engine

use thiserror::Error;

/// Errors raised while mounting or driving a [`QuoteMachine`](crate::QuoteMachine)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// The catalog (or a pick pool derived from it) has no quotes
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The accent palette has no colors
    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    /// A palette entry is not a `#rrggbb` color
    #[error("Invalid color {value:?}: expected #rrggbb")]
    InvalidColor {
        /// The string that failed to parse
        value: String,
    },
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, QuoteError>;
