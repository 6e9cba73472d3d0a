//! Tests for deck string parsing

use crate::models::ParsedCardEntry;
use crate::parser::*;

fn entry(name: &str, mana_cost: u32, quantity: u32) -> ParsedCardEntry {
    ParsedCardEntry {
        name: name.to_string(),
        mana_cost,
        quantity,
    }
}

fn test_deck_text() -> String {
    [
        "### Test Deck",
        "# Class: Mage",
        "# Format: Standard",
        "# 2x (3) Fireball",
        "# 1x (1) Arcane Missiles",
        "#",
        "#",
        "#",
        "#",
        "#",
        "#",
    ]
    .join("\n")
}

#[test]
fn test_is_valid_deck_rejects_empty_and_garbage() {
    assert!(!is_valid_deck(""));
    assert!(!is_valid_deck("garbage"));
}

#[test]
fn test_is_valid_deck_requires_header_marker() {
    let text = test_deck_text().replacen("###", "", 1);
    assert!(!is_valid_deck(&text));
}

#[test]
fn test_is_valid_deck_requires_minimum_lines() {
    let nine_lines = vec!["### Short"; 9].join("\n");
    assert!(!is_valid_deck(&nine_lines));

    let ten_lines = vec!["### Enough"; 10].join("\n");
    assert!(is_valid_deck(&ten_lines));
}

#[test]
fn test_is_valid_deck_accepts_example() {
    assert!(is_valid_deck(&test_deck_text()));
}

#[test]
fn test_parse_metadata_example() {
    let metadata = parse_metadata(&test_deck_text());
    assert_eq!(metadata.name, "Test Deck");
    assert_eq!(metadata.player_class, "Mage");
    assert_eq!(metadata.game_format, "Standard");
}

#[test]
fn test_parse_metadata_defaults_when_labels_missing() {
    let metadata = parse_metadata("### Bare Deck\n# 2x (1) Wisp\n");
    assert_eq!(metadata.name, "Bare Deck");
    assert_eq!(metadata.player_class, DEFAULT_CLASS);
    assert_eq!(metadata.game_format, DEFAULT_FORMAT);
}

#[test]
fn test_parse_metadata_only_reads_header_region() {
    let mut lines = vec!["### Late Labels"];
    lines.extend(vec!["#"; HEADER_LINES]);
    lines.push("# Class: Warrior");
    lines.push("# Format: Wild");

    let metadata = parse_metadata(&lines.join("\n"));
    assert_eq!(metadata.player_class, DEFAULT_CLASS);
    assert_eq!(metadata.game_format, DEFAULT_FORMAT);
}

#[test]
fn test_parse_metadata_labels_case_insensitive_and_any_order() {
    let metadata = parse_metadata("### Rogue Stuff\n#format: Wild\n# CLASS:   Rogue  \n");
    assert_eq!(metadata.player_class, "Rogue");
    assert_eq!(metadata.game_format, "Wild");
}

#[test]
fn test_parse_metadata_empty_name_falls_back() {
    let metadata = parse_metadata("###   \n# Class: Druid\n");
    assert_eq!(metadata.name, DEFAULT_DECK_NAME);
    assert_eq!(metadata.player_class, "Druid");
}

#[test]
fn test_parse_cards_example() {
    let cards = parse_cards(&test_deck_text());
    assert_eq!(
        cards,
        vec![entry("Fireball", 3, 2), entry("Arcane Missiles", 1, 1)]
    );
}

#[test]
fn test_parse_cards_without_comment_marker() {
    let cards = parse_cards("2x (2) Frostbolt\n1x (10) Alexstrasza");
    assert_eq!(
        cards,
        vec![entry("Frostbolt", 2, 2), entry("Alexstrasza", 10, 1)]
    );
}

#[test]
fn test_parse_cards_skips_malformed_lines() {
    let text = "### Deck\n# 2x (3) Fireball\nnot a card line\n# x (3) Missing Quantity\n# 2x Missing Cost\n\n   \n# 1x (0) Wisp";
    let cards = parse_cards(text);
    assert_eq!(cards, vec![entry("Fireball", 3, 2), entry("Wisp", 0, 1)]);
}

#[test]
fn test_parse_cards_discards_overflowing_numbers() {
    let text = "# 99999999999x (1) Too Many\n# 1x (99999999999) Too Expensive\n# 1x (2) Fine";
    let cards = parse_cards(text);
    assert_eq!(cards, vec![entry("Fine", 2, 1)]);
}

#[test]
fn test_parse_cards_discards_zero_quantity() {
    let cards = parse_cards("# 0x (1) Nothing\n# 2x (1) Something");
    assert_eq!(cards, vec![entry("Something", 1, 2)]);
}

#[test]
fn test_parse_cards_keeps_duplicate_lines() {
    let cards = parse_cards("# 1x (4) Fireball\n# 1x (4) Fireball");
    assert_eq!(cards, vec![entry("Fireball", 4, 1), entry("Fireball", 4, 1)]);
}

#[test]
fn test_parse_cards_cleans_names() {
    let cards = parse_cards("# 2x (3) * Fireball 2\n# 1x (1) - Arcane Missiles   \n# 1x (5) ##Flamestrike");
    assert_eq!(
        cards,
        vec![
            entry("Fireball", 3, 2),
            entry("Arcane Missiles", 1, 1),
            entry("Flamestrike", 5, 1)
        ]
    );
}

#[test]
fn test_parse_cards_discards_name_that_cleans_to_nothing() {
    let cards = parse_cards("# 2x (3) 42\n# 1x (1) Wisp");
    assert_eq!(cards, vec![entry("Wisp", 1, 1)]);
}

#[test]
fn test_parse_card_line_single() {
    assert_eq!(parse_card_line("# 2X (7) Ragnaros"), Some(entry("Ragnaros", 7, 2)));
    assert_eq!(parse_card_line("# Class: Mage"), None);
    assert_eq!(parse_card_line(""), None);
}

#[test]
fn test_parse_deck_rejects_invalid_text() {
    let result = parse_deck("garbage");
    assert!(matches!(
        result,
        Err(crate::error::DeckError::InvalidDeckFormat(_))
    ));
}

#[test]
fn test_parse_deck_totals_match_lines() {
    let deck = parse_deck(&test_deck_text()).unwrap();
    assert_eq!(deck.metadata.name, "Test Deck");
    assert_eq!(deck.cards.len(), 2);
    assert_eq!(deck.total_quantity(), 3);
}
