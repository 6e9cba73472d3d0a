//! Deck Engine - command line front-end
//!
//! Imports deck export strings into the local SQLite store, refreshes and
//! deletes decks, prints statistics and export strings.

use clap::{Parser, Subcommand};
use deck_engine::catalog::{search_cards, CardFilter};
use deck_engine::database::{self, default_db_path};
use deck_engine::deck_store::{deck_entries, filter_decks, find_deck};
use deck_engine::persister::{delete_deck, import_from_source, refresh_from_source};
use deck_engine::{compute_statistics, export_deck, CardType, FileText, StdinText, TextSource};
use rusqlite::Connection;
use std::path::PathBuf;

/// Card game deck manager - imports deck strings and reports deck statistics
#[derive(Parser, Debug)]
#[command(name = "deck_engine")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, global = true, default_value_os_t = default_db_path())]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a deck string (from a file, or stdin if no file is given)
    Import {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Replace the cards of an existing deck with those of a new deck string
    Refresh {
        deck: String,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete a deck and its card entries
    Delete { deck: String },
    /// Print statistics for a deck
    Stats {
        deck: String,
        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print a deck as an export string
    Export { deck: String },
    /// List decks, optionally filtered by name and/or class substring
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        class: Option<String>,
    },
    /// Show the cards of a deck
    Show { deck: String },
    /// Search the card catalog
    Cards {
        /// Name substring
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        class: Option<String>,
        /// Card type (Creature, Spell, Location, Weapon, Hero)
        #[arg(long = "type")]
        card_type: Option<String>,
    },
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=deck_engine=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("Database path: {}", args.database.display());

    let mut conn = match database::open(&args.database) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut conn, args.command) {
        log::error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(if e.is_user_error() { 2 } else { 1 });
    }
}

fn text_source(file: Option<PathBuf>) -> Box<dyn TextSource> {
    match file {
        Some(path) => Box::new(FileText::new(path)),
        None => Box::new(StdinText),
    }
}

fn run(conn: &mut Connection, command: Command) -> deck_engine::Result<()> {
    match command {
        Command::Import { file } => {
            let deck = import_from_source(conn, text_source(file).as_ref())?;
            println!(
                "Imported '{}' ({}, {})",
                deck.name, deck.player_class, deck.game_format
            );
        }
        Command::Refresh { deck, file } => {
            if refresh_from_source(conn, &deck, text_source(file).as_ref())? {
                println!("Refreshed '{}'", deck);
            } else {
                println!("No deck named '{}'", deck);
            }
        }
        Command::Delete { deck } => {
            if delete_deck(conn, &deck)? {
                println!("Deleted '{}'", deck);
            } else {
                println!("No deck named '{}'", deck);
            }
        }
        Command::Stats { deck, json } => match compute_statistics(conn, &deck)? {
            Some(stats) if json => println!("{}", serde_json::to_string_pretty(&stats)?),
            Some(stats) => print!("{}", stats.summary()),
            None => println!("No deck named '{}'", deck),
        },
        Command::Export { deck } => match export_deck(conn, &deck)? {
            Some(text) => print!("{}", text),
            None => println!("No deck named '{}'", deck),
        },
        Command::List { name, class } => {
            let decks = filter_decks(conn, name.as_deref(), class.as_deref())?;
            if decks.is_empty() {
                println!("No decks found");
            }
            for deck in decks {
                println!("{} [{} / {}]", deck.name, deck.player_class, deck.game_format);
            }
        }
        Command::Show { deck } => match find_deck(conn, &deck)? {
            Some(found) => {
                println!(
                    "{} [{} / {}]",
                    found.name, found.player_class, found.game_format
                );
                for entry in deck_entries(conn, found.id)? {
                    println!("  {}x {}", entry.quantity, entry.card_name);
                }
            }
            None => println!("No deck named '{}'", deck),
        },
        Command::Cards {
            search,
            class,
            card_type,
        } => {
            let card_type = match card_type {
                Some(raw) => match CardType::parse(&raw) {
                    Some(t) => Some(t),
                    None => {
                        println!("Unknown card type '{}'", raw);
                        return Ok(());
                    }
                },
                None => None,
            };
            let filter = CardFilter {
                name: search,
                card_class: class,
                card_type,
                ..Default::default()
            };
            for card in search_cards(conn, &filter)? {
                let kind = card.card_type.map(|t| t.as_str()).unwrap_or("?");
                let class = card.card_class.as_deref().unwrap_or("?");
                println!("({}) {} - {} {}", card.mana_cost, card.name, class, kind);
            }
        }
    }
    Ok(())
}
