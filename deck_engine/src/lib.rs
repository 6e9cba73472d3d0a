//! Deck Engine - card game deck import, storage and statistics
//!
//! Parses deck export strings, reconciles their cards against a SQLite card
//! catalog, stores decks transactionally and computes deck statistics.

pub mod catalog;
pub mod database;
pub mod deck_store;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod persister;
pub mod reconciler;
pub mod statistics;
pub mod text_source;

pub use catalog::CardFilter;
pub use error::{DeckError, Result};
pub use export::export_deck;
pub use models::{
    Card, CardType, Deck, DeckCardEntry, NewCard, ParsedCardEntry, ParsedDeck, ParsedDeckMetadata,
};
pub use parser::{is_valid_deck, parse_cards, parse_deck, parse_metadata};
pub use persister::{add_deck, delete_deck, replace_deck_contents};
pub use reconciler::{reconcile, ReconcileReport};
pub use statistics::{compute_statistics, DeckStatistics};
pub use text_source::{FileText, StaticText, StdinText, TextSource};
