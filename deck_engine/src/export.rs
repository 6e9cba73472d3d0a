//! Copy-out of stored decks as deck export strings
//!
//! The output parses back through `parser::parse_deck` into the same card
//! names and quantities, with duplicate entries merged into one line.

use crate::catalog::find_cards;
use crate::deck_store::{deck_entries, find_deck};
use crate::error::Result;
use crate::models::Deck;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rusqlite::Connection;
use std::collections::HashMap;

/// Trailing instructions comment of every export
pub const EXPORT_FOOTER: &str =
    "# To use this deck, copy it to your clipboard and create a new deck in the game client.";

/// One distinct card of an exported deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    pub quantity: u64,
    pub mana_cost: u32,
    pub name: String,
}

/// Export string for the named deck, or `None` if there is no such deck.
pub fn export_deck(conn: &Connection, deck_name: &str) -> Result<Option<String>> {
    let deck = match find_deck(conn, deck_name)? {
        Some(deck) => deck,
        None => return Ok(None),
    };

    let entries = deck_entries(conn, deck.id)?;
    let names: Vec<&str> = entries.iter().map(|e| e.card_name.as_str()).collect();
    let cards = find_cards(conn, &names)?;

    let mut lines: Vec<ExportLine> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for entry in &entries {
        if let Some(&i) = index_by_name.get(entry.card_name.as_str()) {
            lines[i].quantity += u64::from(entry.quantity);
            continue;
        }

        let mana_cost = match cards.get(&entry.card_name) {
            Some(card) => card.mana_cost,
            None => {
                log::warn!(
                    "Card '{}' is not in the catalog, exporting with cost 0",
                    entry.card_name
                );
                0
            }
        };
        index_by_name.insert(entry.card_name.as_str(), lines.len());
        lines.push(ExportLine {
            quantity: u64::from(entry.quantity),
            mana_cost,
            name: entry.card_name.clone(),
        });
    }

    lines.sort_by(|a, b| a.mana_cost.cmp(&b.mana_cost).then_with(|| a.name.cmp(&b.name)));
    log::debug!("Exporting deck '{}' with {} distinct cards", deck.name, lines.len());

    Ok(Some(format_deck_string(&deck, &lines)))
}

/// Renders a deck export string from a deck and its card lines
pub fn format_deck_string(deck: &Deck, lines: &[ExportLine]) -> String {
    let mut output = String::new();

    output.push_str(&format!("### {}\n", deck.name));
    output.push_str(&format!("# Class: {}\n", deck.player_class));
    output.push_str(&format!("# Format: {}\n", deck.game_format));
    output.push_str("#\n");

    for line in lines {
        output.push_str(&format!(
            "# {}x ({}) {}\n",
            line.quantity, line.mana_cost, line.name
        ));
    }

    output.push_str("#\n");
    output.push_str(&encode_deck_code(lines));
    output.push('\n');
    output.push_str(EXPORT_FOOTER);
    output.push('\n');
    output
}

/// Opaque single-token deck code; importers skip it
fn encode_deck_code(lines: &[ExportLine]) -> String {
    let payload = lines
        .iter()
        .map(|l| format!("{}:{}", l.quantity, l.name))
        .collect::<Vec<_>>()
        .join("\n");
    STANDARD.encode(payload)
}
