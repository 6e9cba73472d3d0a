//! Deck persistence: import, refresh and delete decks as single units of work.
//!
//! Each operation opens one transaction on the connection it is handed. On any
//! error the transaction is dropped without commit, which rolls it back, so a
//! deck row is never visible without its card entries.

use crate::deck_store::{
    delete_deck_by_id, delete_entries, find_deck, insert_deck, insert_entries,
};
use crate::error::{DeckError, Result};
use crate::models::{Deck, ParsedDeck};
use crate::parser::parse_deck;
use crate::reconciler::reconcile;
use crate::text_source::TextSource;
use rusqlite::{Connection, Transaction};

/// Parse a deck string and store it as a new deck.
///
/// Fails with `InvalidDeckFormat` if the text is not a deck string and with
/// `DuplicateDeckName` if a deck of that name already exists.
pub fn add_deck(conn: &mut Connection, text: &str) -> Result<Deck> {
    let parsed = parse_deck(text)?;
    let tx = conn.transaction()?;
    let deck = add_deck_tx(&tx, &parsed)?;
    tx.commit()?;

    log::info!(
        "Imported deck '{}' ({} entries, {} cards)",
        deck.name,
        parsed.cards.len(),
        parsed.total_quantity()
    );
    Ok(deck)
}

fn add_deck_tx(tx: &Transaction<'_>, parsed: &ParsedDeck) -> Result<Deck> {
    let name = &parsed.metadata.name;
    if find_deck(tx, name)?.is_some() {
        return Err(DeckError::DuplicateDeckName(name.clone()));
    }

    reconcile(tx, &parsed.cards)?;
    let deck = insert_deck(tx, &parsed.metadata)?;
    insert_entries(tx, deck.id, &parsed.cards)?;
    Ok(deck)
}

/// Replace the card list of an existing deck with the cards of a new deck string.
///
/// The deck row keeps its name, class and format even if the new header
/// differs. Returns `Ok(false)` if no deck of that name exists.
pub fn replace_deck_contents(conn: &mut Connection, deck_name: &str, text: &str) -> Result<bool> {
    let parsed = parse_deck(text)?;
    let tx = conn.transaction()?;

    let deck = match find_deck(&tx, deck_name)? {
        Some(deck) => deck,
        None => {
            log::info!("Deck '{}' not found, nothing to refresh", deck_name);
            return Ok(false);
        }
    };

    if parsed.metadata.name != deck.name
        || parsed.metadata.player_class != deck.player_class
        || parsed.metadata.game_format != deck.game_format
    {
        log::debug!(
            "Header of new text ('{}', {}, {}) differs from deck '{}'; keeping deck identity",
            parsed.metadata.name,
            parsed.metadata.player_class,
            parsed.metadata.game_format,
            deck.name
        );
    }

    let removed = delete_entries(&tx, deck.id)?;
    reconcile(&tx, &parsed.cards)?;
    let inserted = insert_entries(&tx, deck.id, &parsed.cards)?;
    tx.commit()?;

    log::info!(
        "Refreshed deck '{}': {} entries replaced by {}",
        deck.name,
        removed,
        inserted
    );
    Ok(true)
}

/// Delete a deck and all of its entries. Returns `Ok(false)` if no such deck.
pub fn delete_deck(conn: &mut Connection, deck_name: &str) -> Result<bool> {
    let tx = conn.transaction()?;

    let deck = match find_deck(&tx, deck_name)? {
        Some(deck) => deck,
        None => return Ok(false),
    };

    let removed = delete_entries(&tx, deck.id)?;
    delete_deck_by_id(&tx, deck.id)?;
    tx.commit()?;

    log::info!("Deleted deck '{}' ({} entries)", deck.name, removed);
    Ok(true)
}

/// Read a deck string from `source` and import it
pub fn import_from_source(conn: &mut Connection, source: &dyn TextSource) -> Result<Deck> {
    let text = source.read_text()?;
    add_deck(conn, &text)
}

/// Read a deck string from `source` and use it to refresh `deck_name`
pub fn refresh_from_source(
    conn: &mut Connection,
    deck_name: &str,
    source: &dyn TextSource,
) -> Result<bool> {
    let text = source.read_text()?;
    replace_deck_contents(conn, deck_name, &text)
}
