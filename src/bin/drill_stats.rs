use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use times_tables::card::{Card, MAX_LEVEL};
use times_tables::database::{Database, TableMastery};
use times_tables::store::ProgressStore;
use times_tables::time_format::format_seconds;

const RECENT_GAMES: i32 = 5;
const FACTS_LISTED: i32 = 5;

/// Analyzes multiplication drill progress stored in a database file
#[derive(Parser, Debug)]
#[command(name = "drill_stats")]
#[command(about = "Analyzes multiplication drill progress stored in a database file")]
struct Cli {
    /// Path to the SQLite database file
    database_file: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let db = match Database::new(&cli.database_file.to_string_lossy()) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            std::process::exit(1);
        }
    };

    let stats = db.load_statistics();
    if stats.games_played == 0 {
        println!("No games played yet.");
        return;
    }

    println!("{}", "Multiplication Drill Report".bold());
    println!("===========================");
    println!();

    println!("Games played:     {}", stats.games_played);
    println!("Total points:     {}", stats.total_points);
    println!("Correct answers:  {}", stats.total_correct_answers);
    println!("Average points:   {:.1}", stats.average_points());
    match db.compute_streak() {
        Ok(days) => println!("Current streak:   {} day{}", days, if days == 1 { "" } else { "s" }),
        Err(e) => eprintln!("Error computing streak: {}", e),
    }
    println!();

    match db.get_recent_games(RECENT_GAMES) {
        Ok(games) => {
            println!("{}", "Recent games".bold());
            println!("{}", "-".repeat(60));
            for game in games {
                let line = game.to_string();
                if game.correct_answers == game.total_cards {
                    println!("  {}", line.green());
                } else {
                    println!("  {}", line);
                }
            }
            println!();
        }
        Err(e) => eprintln!("Error fetching recent games: {}", e),
    }

    match db.compute_table_mastery() {
        Ok(tables) => print_mastery(&tables),
        Err(e) => eprintln!("Error computing table mastery: {}", e),
    }

    match db.get_weakest_cards(FACTS_LISTED) {
        Ok(cards) => print_facts("Weakest facts", &cards),
        Err(e) => eprintln!("Error fetching weakest facts: {}", e),
    }

    match db.get_slowest_cards(FACTS_LISTED) {
        Ok(cards) => print_facts("Slowest facts", &cards),
        Err(e) => eprintln!("Error fetching slowest facts: {}", e),
    }
}

/// Print average level and mastered facts per table
fn print_mastery(tables: &[TableMastery]) {
    println!("{}", "Mastery by table".bold());
    println!("{}", "-".repeat(60));
    for table in tables {
        let summary = format!(
            "  Table {}: average level {:.1}, {}/{} mastered, average time {}",
            table.table,
            table.average_level,
            table.mastered,
            table.cards_seen,
            format_seconds(table.average_time_seconds)
        );
        if table.mastered == table.cards_seen {
            println!("{}", summary.green());
        } else if table.average_level < 2.0 {
            println!("{}", summary.red());
        } else {
            println!("{}", summary);
        }
    }
    println!();
}

fn print_facts(label: &str, cards: &[Card]) {
    println!("{}", label.bold());
    println!("{}", "-".repeat(60));
    for card in cards {
        let line = format!(
            "  {} = {}  level {}/{}  {}",
            card.question(),
            card.answer(),
            card.level(),
            MAX_LEVEL,
            format_seconds(card.time())
        );
        if card.level() == 1 {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
    println!();
}
