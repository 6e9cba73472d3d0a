use serde::Serialize;

/// Card types known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CardType {
    Creature,
    Spell,
    Location,
    Weapon,
    Hero,
}

impl CardType {
    /// Returns the name stored in the database (e.g., "Creature")
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Creature => "Creature",
            CardType::Spell => "Spell",
            CardType::Location => "Location",
            CardType::Weapon => "Weapon",
            CardType::Hero => "Hero",
        }
    }

    /// Parse a type name, case-insensitive. "Minion" is accepted as a creature.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "creature" | "minion" => Some(CardType::Creature),
            "spell" => Some(CardType::Spell),
            "location" => Some(CardType::Location),
            "weapon" => Some(CardType::Weapon),
            "hero" => Some(CardType::Hero),
            _ => None,
        }
    }

    /// Returns all card types
    pub fn all() -> &'static [CardType] {
        &[
            CardType::Creature,
            CardType::Spell,
            CardType::Location,
            CardType::Weapon,
            CardType::Hero,
        ]
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry as stored in the `cards` table.
///
/// `None` in `card_class`, `card_type`, `rarity` or `expansion` means the
/// field was never filled in, which is the case for cards created during
/// import reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub card_class: Option<String>,
    pub mana_cost: u32,
    pub card_type: Option<CardType>,
    pub subtype: Option<String>,
    pub attack: Option<u32>,
    pub health: Option<u32>,
    pub durability: Option<u32>,
    pub rarity: Option<String>,
    pub expansion: Option<String>,
}

impl Card {
    /// Returns true if this card only carries what a deck string provides
    pub fn is_placeholder(&self) -> bool {
        self.card_type.is_none() && self.rarity.is_none() && self.expansion.is_none()
    }
}

/// Insert form of a catalog card
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCard {
    pub name: String,
    pub card_class: Option<String>,
    pub mana_cost: u32,
    pub card_type: Option<CardType>,
    pub subtype: Option<String>,
    pub attack: Option<u32>,
    pub health: Option<u32>,
    pub durability: Option<u32>,
    pub rarity: Option<String>,
    pub expansion: Option<String>,
}

impl NewCard {
    /// Minimal catalog entry: only name and mana cost are known
    pub fn placeholder(name: &str, mana_cost: u32) -> Self {
        Self {
            name: name.to_string(),
            mana_cost,
            ..Default::default()
        }
    }
}

/// A stored deck
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub player_class: String,
    pub game_format: String,
    pub created_at: String,
}

/// One card line of a stored deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckCardEntry {
    pub deck_id: i64,
    pub card_name: String,
    pub quantity: u32,
}

/// Deck header extracted from a deck string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeckMetadata {
    pub name: String,
    pub player_class: String,
    pub game_format: String,
}

/// One `<qty>x (<cost>) <name>` line extracted from a deck string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCardEntry {
    pub name: String,
    pub mana_cost: u32,
    pub quantity: u32,
}

/// A fully parsed deck string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeck {
    pub metadata: ParsedDeckMetadata,
    pub cards: Vec<ParsedCardEntry>,
}

impl ParsedDeck {
    /// Sum of all parsed quantities
    pub fn total_quantity(&self) -> u64 {
        self.cards.iter().map(|c| u64::from(c.quantity)).sum()
    }
}
