//! SQLite store for the card catalog and decks
//!
//! Uses parameterized queries exclusively (no SQL string concatenation of values).
//! Every multi-row write in this crate runs inside a single transaction.

use crate::error::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Result type for raw database operations
pub type DbResult<T> = rusqlite::Result<T>;

/// Returns the default database path: ~/.local/share/deck_engine/decks.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deck_engine")
        .join("decks.db")
}

/// Opens (or creates) the database at `path` and initialises the schema.
///
/// Missing parent directories are created.
pub fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            log::info!("Created directory: {}", parent.display());
        }
    }

    let conn = Connection::open(path)?;
    configure(&conn)?;
    init_schema(&conn)?;
    log::info!("Opened database: {}", path.display());
    Ok(conn)
}

/// Opens a private in-memory store with the schema in place
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

/// Initialize the database schema
///
/// Creates tables if they don't exist:
/// - `cards`: the card catalog, one row per card name
/// - `decks`: named decks
/// - `deck_cards`: quantity-bearing deck entries, removed with their deck
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        -- Card catalog. NULL class/type/rarity/expansion marks an incomplete entry.
        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            card_class TEXT,
            mana_cost INTEGER NOT NULL CHECK (mana_cost >= 0),
            card_type TEXT,
            subtype TEXT,
            attack INTEGER CHECK (attack >= 0),
            health INTEGER CHECK (health >= 0),
            durability INTEGER CHECK (durability >= 0),
            rarity TEXT,
            expansion TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS decks (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            player_class TEXT NOT NULL,
            game_format TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        -- Entries reference cards by name so a removed catalog card leaves a
        -- dangling entry instead of failing the delete.
        CREATE TABLE IF NOT EXISTS deck_cards (
            id INTEGER PRIMARY KEY,
            deck_id INTEGER NOT NULL,
            card_name TEXT NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            FOREIGN KEY (deck_id) REFERENCES decks(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_deck_cards_deck ON deck_cards(deck_id);
        CREATE INDEX IF NOT EXISTS idx_deck_cards_card ON deck_cards(card_name);
        ",
    )?;

    log::debug!("Database schema initialized");
    Ok(())
}

/// Current time as an RFC 3339 string, used for `created_at` / `updated_at`
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
