//! Catalog reconciliation: make sure every card a deck names exists in the catalog.
//!
//! Lookup is a single batched set-membership query; missing cards are inserted
//! as placeholders with only name and mana cost known. Cards already in the
//! catalog are never modified, even when the deck string disagrees on cost.

use crate::catalog::{existing_names, insert_cards};
use crate::error::Result;
use crate::models::{NewCard, ParsedCardEntry};
use rusqlite::Connection;
use std::collections::HashSet;

/// Result of a reconciliation pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Names that were added to the catalog, in first-seen order
    pub inserted: Vec<String>,
    /// Number of distinct names that were already present
    pub existing: usize,
}

/// Inserts placeholder catalog entries for every parsed card name not yet known.
///
/// Pass a `Transaction` to make the inserts part of a larger unit of work.
pub fn reconcile(conn: &Connection, entries: &[ParsedCardEntry]) -> Result<ReconcileReport> {
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    let known = existing_names(conn, &names)?;

    let mut seen = HashSet::new();
    let mut existing = 0;
    let mut new_cards = Vec::new();

    for entry in entries {
        if !seen.insert(entry.name.as_str()) {
            continue;
        }
        if known.contains(&entry.name) {
            existing += 1;
        } else {
            new_cards.push(NewCard::placeholder(&entry.name, entry.mana_cost));
        }
    }

    insert_cards(conn, &new_cards)?;

    if !new_cards.is_empty() {
        log::info!(
            "Added {} new cards to catalog ({} already known)",
            new_cards.len(),
            existing
        );
    }

    Ok(ReconcileReport {
        inserted: new_cards.into_iter().map(|c| c.name).collect(),
        existing,
    })
}
