use crate::catalog::find_cards;
use crate::deck_store::{deck_entries, find_deck};
use crate::error::Result;
use crate::models::{CardType, DeckCardEntry};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Costs at or above this are grouped into one mana curve bucket
pub const MANA_CURVE_CAP: u32 = 7;

/// Aggregate view of a deck's contents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeckStatistics {
    /// Sum of all entry quantities, including cards missing from the catalog
    pub total_cards: u64,
    pub creatures: u64,
    pub spells: u64,
    pub weapons: u64,
    pub locations: u64,
    pub heroes: u64,
    /// Cards whose name no longer resolves to a catalog entry
    pub unresolved_cards: u64,
    /// Quantity-weighted mean over resolved cards, two decimals
    pub average_mana_cost: f64,
    /// Mana cost -> number of cards; the last bucket holds everything >= MANA_CURVE_CAP
    pub mana_curve: BTreeMap<u32, u64>,
}

impl DeckStatistics {
    /// Number of cards of the given type
    pub fn count_of(&self, card_type: CardType) -> u64 {
        match card_type {
            CardType::Creature => self.creatures,
            CardType::Spell => self.spells,
            CardType::Weapon => self.weapons,
            CardType::Location => self.locations,
            CardType::Hero => self.heroes,
        }
    }

    fn add(&mut self, card_type: CardType, quantity: u64) {
        match card_type {
            CardType::Creature => self.creatures += quantity,
            CardType::Spell => self.spells += quantity,
            CardType::Weapon => self.weapons += quantity,
            CardType::Location => self.locations += quantity,
            CardType::Hero => self.heroes += quantity,
        }
    }

    /// Plain-text report, one figure per line
    pub fn summary(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Total cards: {}\n", self.total_cards));
        for card_type in CardType::all() {
            let label = match card_type {
                CardType::Creature => "Creatures",
                CardType::Spell => "Spells",
                CardType::Weapon => "Weapons",
                CardType::Location => "Locations",
                CardType::Hero => "Heroes",
            };
            output.push_str(&format!("{}: {}\n", label, self.count_of(*card_type)));
        }
        if self.unresolved_cards > 0 {
            output.push_str(&format!("Not in catalog: {}\n", self.unresolved_cards));
        }
        output.push_str(&format!("Average mana cost: {:.2}\n", self.average_mana_cost));

        if !self.mana_curve.is_empty() {
            output.push_str("Mana curve:\n");
            for (cost, count) in &self.mana_curve {
                let label = if *cost >= MANA_CURVE_CAP {
                    format!("{}+", MANA_CURVE_CAP)
                } else {
                    cost.to_string()
                };
                output.push_str(&format!("  {:>2}: {}\n", label, count));
            }
        }
        output
    }
}

/// Statistics for the named deck, or `None` if there is no such deck.
pub fn compute_statistics(conn: &Connection, deck_name: &str) -> Result<Option<DeckStatistics>> {
    let deck = match find_deck(conn, deck_name)? {
        Some(deck) => deck,
        None => return Ok(None),
    };

    let entries = deck_entries(conn, deck.id)?;
    let names: Vec<&str> = entries.iter().map(|e| e.card_name.as_str()).collect();
    let cards = find_cards(conn, &names)?;
    let costs_and_types: HashMap<&str, (u32, Option<CardType>)> = cards
        .iter()
        .map(|(name, card)| (name.as_str(), (card.mana_cost, card.card_type)))
        .collect();

    Ok(Some(summarize(&entries, &costs_and_types)))
}

/// Folds entries into statistics given each resolvable card's cost and type
fn summarize(
    entries: &[DeckCardEntry],
    catalog: &HashMap<&str, (u32, Option<CardType>)>,
) -> DeckStatistics {
    let mut stats = DeckStatistics::default();
    let mut cost_sum: u128 = 0;
    let mut resolved: u64 = 0;

    for entry in entries {
        let quantity = u64::from(entry.quantity);
        stats.total_cards += quantity;

        let Some((mana_cost, card_type)) = catalog.get(entry.card_name.as_str()) else {
            log::warn!("Card '{}' is not in the catalog", entry.card_name);
            stats.unresolved_cards += quantity;
            continue;
        };

        if let Some(card_type) = card_type {
            stats.add(*card_type, quantity);
        }
        cost_sum += u128::from(*mana_cost) * u128::from(quantity);
        resolved += quantity;
        *stats
            .mana_curve
            .entry((*mana_cost).min(MANA_CURVE_CAP))
            .or_insert(0) += quantity;
    }

    stats.average_mana_cost = if resolved == 0 {
        0.0
    } else {
        round2(cost_sum as f64 / resolved as f64)
    };
    stats
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
