//! Deck store: `decks` and `deck_cards` tables

use crate::database::{now_timestamp, DbResult};
use crate::models::{Deck, DeckCardEntry, ParsedCardEntry, ParsedDeckMetadata};
use rusqlite::{params, Connection, Row};

fn deck_from_row(row: &Row<'_>) -> DbResult<Deck> {
    Ok(Deck {
        id: row.get(0)?,
        name: row.get(1)?,
        player_class: row.get(2)?,
        game_format: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Look up a deck by exact name
pub fn find_deck(conn: &Connection, name: &str) -> DbResult<Option<Deck>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, player_class, game_format, created_at
         FROM decks
         WHERE name = ?1",
    )?;
    let mut rows = stmt.query(params![name])?;
    match rows.next()? {
        Some(row) => Ok(Some(deck_from_row(row)?)),
        None => Ok(None),
    }
}

/// Insert a new deck row built from parsed metadata
pub fn insert_deck(conn: &Connection, metadata: &ParsedDeckMetadata) -> DbResult<Deck> {
    let created_at = now_timestamp();
    conn.execute(
        "INSERT INTO decks (name, player_class, game_format, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            &metadata.name,
            &metadata.player_class,
            &metadata.game_format,
            &created_at
        ],
    )?;

    Ok(Deck {
        id: conn.last_insert_rowid(),
        name: metadata.name.clone(),
        player_class: metadata.player_class.clone(),
        game_format: metadata.game_format.clone(),
        created_at,
    })
}

/// Delete a deck row by id. Remaining entries go with it via ON DELETE CASCADE.
pub fn delete_deck_by_id(conn: &Connection, deck_id: i64) -> DbResult<bool> {
    let changed = conn.execute("DELETE FROM decks WHERE id = ?1", params![deck_id])?;
    Ok(changed > 0)
}

/// Remove all card entries of a deck, returning how many rows went
pub fn delete_entries(conn: &Connection, deck_id: i64) -> DbResult<usize> {
    conn.execute("DELETE FROM deck_cards WHERE deck_id = ?1", params![deck_id])
}

/// Insert one entry per parsed card line, in order
pub fn insert_entries(
    conn: &Connection,
    deck_id: i64,
    cards: &[ParsedCardEntry],
) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO deck_cards (deck_id, card_name, quantity) VALUES (?1, ?2, ?3)",
    )?;

    let mut count = 0;
    for card in cards {
        stmt.execute(params![deck_id, &card.name, card.quantity])?;
        count += 1;
    }
    Ok(count)
}

/// All entries of a deck in insertion order
pub fn deck_entries(conn: &Connection, deck_id: i64) -> DbResult<Vec<DeckCardEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT deck_id, card_name, quantity
         FROM deck_cards
         WHERE deck_id = ?1
         ORDER BY id",
    )?;

    let results: DbResult<Vec<DeckCardEntry>> = stmt
        .query_map(params![deck_id], |row| {
            Ok(DeckCardEntry {
                deck_id: row.get(0)?,
                card_name: row.get(1)?,
                quantity: row.get(2)?,
            })
        })?
        .collect();
    results
}

/// All decks ordered by name
pub fn list_decks(conn: &Connection) -> DbResult<Vec<Deck>> {
    filter_decks(conn, None, None)
}

/// Decks whose name and/or class contain the given substrings (case-insensitive)
pub fn filter_decks(
    conn: &Connection,
    name: Option<&str>,
    player_class: Option<&str>,
) -> DbResult<Vec<Deck>> {
    let name_pattern = name.map(|n| format!("%{}%", n));
    let class_pattern = player_class.map(|c| format!("%{}%", c));

    let mut stmt = conn.prepare(
        "SELECT id, name, player_class, game_format, created_at
         FROM decks
         WHERE (?1 IS NULL OR name LIKE ?1 COLLATE NOCASE)
           AND (?2 IS NULL OR player_class LIKE ?2 COLLATE NOCASE)
         ORDER BY name COLLATE NOCASE",
    )?;

    let results: DbResult<Vec<Deck>> = stmt
        .query_map(params![name_pattern, class_pattern], deck_from_row)?
        .collect();
    results
}

/// Get total count of decks
pub fn deck_count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM decks", [], |row| row.get(0))
}

#[cfg(test)]
pub use tests::make_test_metadata;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::open_in_memory;

    pub fn make_test_metadata(name: &str, player_class: &str) -> ParsedDeckMetadata {
        ParsedDeckMetadata {
            name: name.to_string(),
            player_class: player_class.to_string(),
            game_format: "Standard".to_string(),
        }
    }

    fn entry(name: &str, quantity: u32) -> ParsedCardEntry {
        ParsedCardEntry {
            name: name.to_string(),
            mana_cost: 1,
            quantity,
        }
    }

    #[test]
    fn insert_and_find_deck() {
        let conn = open_in_memory().unwrap();
        let deck = insert_deck(&conn, &make_test_metadata("Tempo Mage", "Mage")).unwrap();

        let found = find_deck(&conn, "Tempo Mage").unwrap().unwrap();
        assert_eq!(found, deck);
        assert_eq!(found.player_class, "Mage");
        assert!(find_deck(&conn, "tempo mage").unwrap().is_none());
    }

    #[test]
    fn stored_created_at_is_rfc3339() {
        let conn = open_in_memory().unwrap();
        insert_deck(&conn, &make_test_metadata("Tempo Mage", "Mage")).unwrap();

        let found = find_deck(&conn, "Tempo Mage").unwrap().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&found.created_at).is_ok());
    }

    #[test]
    fn deck_names_are_unique() {
        let conn = open_in_memory().unwrap();
        insert_deck(&conn, &make_test_metadata("Tempo Mage", "Mage")).unwrap();
        assert!(insert_deck(&conn, &make_test_metadata("Tempo Mage", "Mage")).is_err());
        assert_eq!(deck_count(&conn).unwrap(), 1);
    }

    #[test]
    fn entries_round_trip_in_order() {
        let conn = open_in_memory().unwrap();
        let deck = insert_deck(&conn, &make_test_metadata("Tempo Mage", "Mage")).unwrap();
        let inserted =
            insert_entries(&conn, deck.id, &[entry("Fireball", 2), entry("Frostbolt", 1)]).unwrap();
        assert_eq!(inserted, 2);

        let entries = deck_entries(&conn, deck.id).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].card_name, "Fireball");
        assert_eq!(entries[0].quantity, 2);
        assert_eq!(entries[1].card_name, "Frostbolt");
    }

    #[test]
    fn delete_entries_only_touches_one_deck() {
        let conn = open_in_memory().unwrap();
        let a = insert_deck(&conn, &make_test_metadata("A", "Mage")).unwrap();
        let b = insert_deck(&conn, &make_test_metadata("B", "Mage")).unwrap();
        insert_entries(&conn, a.id, &[entry("Fireball", 2)]).unwrap();
        insert_entries(&conn, b.id, &[entry("Fireball", 1)]).unwrap();

        assert_eq!(delete_entries(&conn, a.id).unwrap(), 1);
        assert!(deck_entries(&conn, a.id).unwrap().is_empty());
        assert_eq!(deck_entries(&conn, b.id).unwrap().len(), 1);
    }

    #[test]
    fn delete_deck_by_id_cascades() {
        let conn = open_in_memory().unwrap();
        let deck = insert_deck(&conn, &make_test_metadata("A", "Mage")).unwrap();
        insert_entries(&conn, deck.id, &[entry("Fireball", 2)]).unwrap();

        assert!(delete_deck_by_id(&conn, deck.id).unwrap());
        assert!(!delete_deck_by_id(&conn, deck.id).unwrap());
        assert!(deck_entries(&conn, deck.id).unwrap().is_empty());
    }

    #[test]
    fn filter_decks_by_name_and_class() {
        let conn = open_in_memory().unwrap();
        insert_deck(&conn, &make_test_metadata("Tempo Mage", "Mage")).unwrap();
        insert_deck(&conn, &make_test_metadata("Control Warrior", "Warrior")).unwrap();
        insert_deck(&conn, &make_test_metadata("Big Spell Mage", "Mage")).unwrap();

        let all = list_decks(&conn).unwrap();
        let names: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Big Spell Mage", "Control Warrior", "Tempo Mage"]);

        let mages = filter_decks(&conn, None, Some("mag")).unwrap();
        assert_eq!(mages.len(), 2);

        let tempo = filter_decks(&conn, Some("TEMPO"), Some("Mage")).unwrap();
        assert_eq!(tempo.len(), 1);
        assert_eq!(tempo[0].name, "Tempo Mage");

        assert!(filter_decks(&conn, Some("Tempo"), Some("Warrior"))
            .unwrap()
            .is_empty());
    }
}
