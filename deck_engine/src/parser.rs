//! Deck export string parsing.
//!
//! A deck string looks like this:
//!
//! ```text
//! ### Big Spell Mage
//! # Class: Mage
//! # Format: Standard
//! #
//! # 2x (1) Arcane Missiles
//! # 2x (4) Fireball
//! #
//! AAECAf0EBu0F7AeBsgKK...
//! # To use this deck, copy it to your clipboard and create a new deck in the game client.
//! ```
//!
//! Parsing never fails on individual lines: a malformed card line is logged
//! and skipped so a partially broken paste still yields the lines it can.

use crate::error::{DeckError, Result};
use crate::models::{ParsedCardEntry, ParsedDeck, ParsedDeckMetadata};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

/// Marker the first line of a deck string starts with
pub const DECK_HEADER_MARKER: &str = "###";

/// Minimum line count for text to be treated as a deck string
pub const MIN_DECK_LINES: usize = 10;

/// Number of leading lines scanned for `Class:` / `Format:` labels
pub const HEADER_LINES: usize = 6;

pub const DEFAULT_CLASS: &str = "Neutral";
pub const DEFAULT_FORMAT: &str = "Standard";
pub const DEFAULT_DECK_NAME: &str = "Untitled Deck";

lazy_static! {
    /// `<quantity>x (<mana cost>) <name>`, optionally behind a `#`
    static ref CARD_LINE: Regex =
        Regex::new(r"^#?\s*(\d+)\s*[xX]\s*\((\d+)\)\s*(.+)$").expect("card line pattern is valid");
}

/// Cheap guard against garbage input before committing to a parse.
pub fn is_valid_deck(text: &str) -> bool {
    text.starts_with(DECK_HEADER_MARKER) && text.lines().count() >= MIN_DECK_LINES
}

/// Reads the deck name from the first line and the class and format labels
/// from the header region. Missing labels fall back to defaults.
pub fn parse_metadata(text: &str) -> ParsedDeckMetadata {
    let mut lines = text.lines();

    let name = lines
        .next()
        .map(|first| first.trim().trim_start_matches('#').trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DECK_NAME)
        .to_string();

    let mut player_class = None;
    let mut game_format = None;

    for line in lines.take(HEADER_LINES - 1) {
        let content = line.trim().trim_start_matches('#').trim();
        if let Some(value) = labeled_value(content, "class") {
            player_class.get_or_insert(value);
        } else if let Some(value) = labeled_value(content, "format") {
            game_format.get_or_insert(value);
        }
    }

    ParsedDeckMetadata {
        name,
        player_class: player_class.unwrap_or_else(|| DEFAULT_CLASS.to_string()),
        game_format: game_format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
    }
}

/// Returns the trimmed value of `<label>: <value>` if `content` carries that label
fn labeled_value(content: &str, label: &str) -> Option<String> {
    let (key, value) = content.split_once(':')?;
    if !key.trim().eq_ignore_ascii_case(label) {
        return None;
    }
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extracts every card line from a deck string, in input order.
///
/// Duplicate lines for the same card are kept as separate entries.
pub fn parse_cards(text: &str) -> Vec<ParsedCardEntry> {
    let mut cards = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_card_line(trimmed) {
            Some(entry) => cards.push(entry),
            None if trimmed.starts_with('#')
                || !trimmed.contains(char::is_whitespace)
                || CARD_LINE.is_match(trimmed) =>
            {
                // Comment, encoded deck code, or a card line parse_card_line already reported
                debug!("Skipping line {}: {}", index + 1, trimmed);
            }
            None => warn!("Skipping unrecognized line {}: {}", index + 1, trimmed),
        }
    }

    debug!("Parsed {} card lines", cards.len());
    cards
}

/// Parses a single `<quantity>x (<mana cost>) <name>` line.
///
/// Returns `None` for lines that do not have that shape or whose numbers
/// are out of range.
pub fn parse_card_line(line: &str) -> Option<ParsedCardEntry> {
    let caps = CARD_LINE.captures(line.trim())?;

    let quantity = match caps[1].parse::<u32>() {
        Ok(0) => {
            warn!("Discarding card line with zero quantity: {}", line.trim());
            return None;
        }
        Ok(quantity) => quantity,
        Err(e) => {
            warn!("Discarding card line with bad quantity '{}': {}", &caps[1], e);
            return None;
        }
    };

    let mana_cost = match caps[2].parse::<u32>() {
        Ok(cost) => cost,
        Err(e) => {
            warn!("Discarding card line with bad mana cost '{}': {}", &caps[2], e);
            return None;
        }
    };

    let name = clean_card_name(&caps[3]);
    if name.is_empty() {
        warn!("Discarding card line without a card name: {}", line.trim());
        return None;
    }

    Some(ParsedCardEntry {
        name,
        mana_cost,
        quantity,
    })
}

/// Strips stray leading marker characters and trailing numeric artifacts
fn clean_card_name(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(|c: char| matches!(c, '#' | '*' | '-' | '•') || c.is_whitespace())
        .trim_end_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
        .to_string()
}

/// Validates and parses a whole deck string.
pub fn parse_deck(text: &str) -> Result<ParsedDeck> {
    if !is_valid_deck(text) {
        return Err(DeckError::InvalidDeckFormat(format!(
            "text must start with '{}' and have at least {} lines",
            DECK_HEADER_MARKER, MIN_DECK_LINES
        )));
    }

    let metadata = parse_metadata(text);
    let cards = parse_cards(text);
    debug!(
        "Parsed deck '{}' ({}, {}) with {} card lines",
        metadata.name,
        metadata.player_class,
        metadata.game_format,
        cards.len()
    );

    Ok(ParsedDeck { metadata, cards })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
