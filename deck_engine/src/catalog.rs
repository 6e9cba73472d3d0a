//! Card catalog store
//!
//! Name-based lookups (single and batched), bulk inserts, in-place updates and
//! deletes for the `cards` table. All functions take any `&Connection`, so they
//! run equally well inside a `Transaction`.

use crate::database::{now_timestamp, DbResult};
use crate::error::{DeckError, Result};
use crate::models::{Card, CardType, NewCard};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::collections::{HashMap, HashSet};

/// Upper bound on bind parameters per batched `IN (...)` query.
/// A normal deck fits into a single query.
pub const MAX_BATCH_PARAMS: usize = 500;

const CARD_COLUMNS: &str = "id, name, card_class, mana_cost, card_type, subtype,
                            attack, health, durability, rarity, expansion";

/// Filter for catalog searches. Unset fields do not restrict the result.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    /// Case-insensitive substring of the card name
    pub name: Option<String>,
    /// Exact class, case-insensitive
    pub card_class: Option<String>,
    pub card_type: Option<CardType>,
    pub min_cost: Option<u32>,
    pub max_cost: Option<u32>,
}

fn card_from_row(row: &Row<'_>) -> DbResult<Card> {
    let card_type: Option<String> = row.get(4)?;
    Ok(Card {
        id: row.get(0)?,
        name: row.get(1)?,
        card_class: row.get(2)?,
        mana_cost: row.get(3)?,
        card_type: card_type.as_deref().and_then(CardType::parse),
        subtype: row.get(5)?,
        attack: row.get(6)?,
        health: row.get(7)?,
        durability: row.get(8)?,
        rarity: row.get(9)?,
        expansion: row.get(10)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Look up a single card by exact name
pub fn find_card(conn: &Connection, name: &str) -> DbResult<Option<Card>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM cards WHERE name = ?1",
        CARD_COLUMNS
    ))?;
    let mut rows = stmt.query(params![name])?;
    match rows.next()? {
        Some(row) => Ok(Some(card_from_row(row)?)),
        None => Ok(None),
    }
}

/// Builds `?1, ?2, ... ?n` for an `IN (...)` clause
fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the subset of `names` present in the catalog.
///
/// One query per `MAX_BATCH_PARAMS` distinct names.
pub fn existing_names(conn: &Connection, names: &[&str]) -> DbResult<HashSet<String>> {
    let distinct: Vec<&str> = dedup(names);
    let mut found = HashSet::with_capacity(distinct.len());

    for chunk in distinct.chunks(MAX_BATCH_PARAMS) {
        let sql = format!(
            "SELECT name FROM cards WHERE name IN ({})",
            placeholders(chunk.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| row.get::<_, String>(0))?;
        for name in rows {
            found.insert(name?);
        }
    }

    Ok(found)
}

/// Batched lookup of full card rows keyed by name
pub fn find_cards(conn: &Connection, names: &[&str]) -> DbResult<HashMap<String, Card>> {
    let distinct: Vec<&str> = dedup(names);
    let mut found = HashMap::with_capacity(distinct.len());

    for chunk in distinct.chunks(MAX_BATCH_PARAMS) {
        let sql = format!(
            "SELECT {} FROM cards WHERE name IN ({})",
            CARD_COLUMNS,
            placeholders(chunk.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(chunk.iter()), card_from_row)?;
        for card in rows {
            let card = card?;
            found.insert(card.name.clone(), card);
        }
    }

    Ok(found)
}

fn dedup<'a>(names: &[&'a str]) -> Vec<&'a str> {
    let mut seen = HashSet::with_capacity(names.len());
    names.iter().copied().filter(|n| seen.insert(*n)).collect()
}

/// Insert a single card. Fails with `DuplicateCard` if the name is taken.
pub fn insert_card(conn: &Connection, card: &NewCard) -> Result<i64> {
    match insert_card_row(conn, card) {
        Ok(id) => Ok(id),
        Err(e) if is_unique_violation(&e) => Err(DeckError::DuplicateCard(card.name.clone())),
        Err(e) => Err(e.into()),
    }
}

fn insert_card_row(conn: &Connection, card: &NewCard) -> DbResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO cards
         (name, card_class, mana_cost, card_type, subtype, attack, health, durability,
          rarity, expansion, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
    )?;
    stmt.execute(params![
        &card.name,
        &card.card_class,
        card.mana_cost,
        card.card_type.map(|t| t.as_str()),
        &card.subtype,
        card.attack,
        card.health,
        card.durability,
        &card.rarity,
        &card.expansion,
        now_timestamp(),
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Bulk insert; each row reuses the one cached prepared statement of `insert_card`.
///
/// Callers wanting all-or-nothing semantics pass a `Transaction`.
pub fn insert_cards(conn: &Connection, cards: &[NewCard]) -> Result<usize> {
    let mut count = 0;
    for card in cards {
        insert_card(conn, card)?;
        count += 1;
    }
    log::debug!("Inserted {} cards into catalog", count);
    Ok(count)
}

/// Update a card in place, matched by id. Returns false if the id is unknown.
pub fn update_card(conn: &Connection, card: &Card) -> Result<bool> {
    let result = conn.execute(
        "UPDATE cards SET
            name = ?2, card_class = ?3, mana_cost = ?4, card_type = ?5, subtype = ?6,
            attack = ?7, health = ?8, durability = ?9, rarity = ?10, expansion = ?11,
            updated_at = ?12
         WHERE id = ?1",
        params![
            card.id,
            &card.name,
            &card.card_class,
            card.mana_cost,
            card.card_type.map(|t| t.as_str()),
            &card.subtype,
            card.attack,
            card.health,
            card.durability,
            &card.rarity,
            &card.expansion,
            now_timestamp(),
        ],
    );

    match result {
        Ok(changed) => Ok(changed > 0),
        Err(e) if is_unique_violation(&e) => Err(DeckError::DuplicateCard(card.name.clone())),
        Err(e) => Err(e.into()),
    }
}

/// Delete a card by name. Deck entries referencing it are left dangling.
pub fn delete_card(conn: &Connection, name: &str) -> DbResult<bool> {
    let changed = conn.execute("DELETE FROM cards WHERE name = ?1", params![name])?;
    if changed > 0 {
        log::info!("Deleted card '{}' from catalog", name);
    }
    Ok(changed > 0)
}

/// All cards ordered by mana cost, then name
pub fn list_cards(conn: &Connection) -> DbResult<Vec<Card>> {
    search_cards(conn, &CardFilter::default())
}

/// Search the catalog, ordered by mana cost, then name
pub fn search_cards(conn: &Connection, filter: &CardFilter) -> DbResult<Vec<Card>> {
    let name_pattern = filter.name.as_ref().map(|n| format!("%{}%", n));
    let mut stmt = conn.prepare(&format!(
        "SELECT {}
         FROM cards
         WHERE (?1 IS NULL OR name LIKE ?1 COLLATE NOCASE)
           AND (?2 IS NULL OR card_class = ?2 COLLATE NOCASE)
           AND (?3 IS NULL OR card_type = ?3)
           AND (?4 IS NULL OR mana_cost >= ?4)
           AND (?5 IS NULL OR mana_cost <= ?5)
         ORDER BY mana_cost, name",
        CARD_COLUMNS
    ))?;

    let results: DbResult<Vec<Card>> = stmt
        .query_map(
            params![
                name_pattern,
                &filter.card_class,
                filter.card_type.map(|t| t.as_str()),
                filter.min_cost,
                filter.max_cost,
            ],
            card_from_row,
        )?
        .collect();
    results
}

/// Get total count of cards in the catalog
pub fn card_count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))
}

#[cfg(test)]
pub use tests::make_test_card;
