//! Error types for mycoquiz-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing an uploaded CSV deck.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing required column: {column}")]
    MissingColumn { column: &'static str },

    #[error("unterminated quoted field starting at line {line}")]
    UnterminatedQuote { line: usize },

    #[error("bundled deck is malformed: {0}")]
    Bundled(#[from] serde_json::Error),
}

/// Errors from deck operations. The deck is left unchanged when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("no cards to load")]
    EmptyLoad,
}
