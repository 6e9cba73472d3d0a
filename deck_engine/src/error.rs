//! Error types for deck_engine

use thiserror::Error;

/// Unified error type for deck import, persistence and export
///
/// A missing deck or card is not an error: lookups return `Option`/`bool`.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Text did not pass the deck-string validity check
    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    /// A deck with this name already exists
    #[error("A deck named '{0}' already exists")]
    DuplicateDeckName(String),

    /// A card with this name already exists in the catalog
    #[error("A card named '{0}' already exists in the catalog")]
    DuplicateCard(String),

    /// Database operation failed; the surrounding transaction was rolled back
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Reading a text source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize output
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DeckError {
    /// True for conditions the user can fix by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DeckError::InvalidDeckFormat(_)
                | DeckError::DuplicateDeckName(_)
                | DeckError::DuplicateCard(_)
        )
    }
}

/// Result alias for deck_engine operations
pub type Result<T> = std::result::Result<T, DeckError>;
