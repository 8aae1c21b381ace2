use std::env;
use times_tables::card::{Card, MAX_LEVEL, MIN_LEVEL};
use times_tables::evaluator::{Evaluation, evaluate};
use times_tables::time_format::format_seconds;

fn main() {
    let args: Vec<String> = env::args().collect();

    let (level, time, elapsed) = validate_input(args);

    let card = match Card::restore(6, 7, level, time) {
        Ok(card) => card,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Answer outcomes for: level={}, baseline={}, elapsed={}",
        card.level(),
        format_seconds(card.time()),
        format_seconds(elapsed)
    );

    print_outcome("Correct", &evaluate(&card, card.answer(), elapsed));
    print_outcome("Wrong", &evaluate(&card, card.answer() + 1, elapsed));
}

fn validate_input(args: Vec<String>) -> (u8, f64, f64) {
    if args.len() != 4 {
        eprintln!("Usage: {} <level> <time> <elapsed>", args[0]);
        eprintln!();
        eprintln!("Arguments:");
        eprintln!(
            "  <level>    Current card level ({}-{})",
            MIN_LEVEL, MAX_LEVEL
        );
        eprintln!("  <time>     Current timing baseline in seconds");
        eprintln!("  <elapsed>  Seconds taken to answer");
        eprintln!();
        eprintln!("Example: {} 2 8.5 3.2", args[0]);
        std::process::exit(1);
    }

    let level: u8 = match args[1].parse() {
        Ok(n) if (MIN_LEVEL..=MAX_LEVEL).contains(&n) => n,
        _ => {
            eprintln!("Error: level must be an integer from {} to {}", MIN_LEVEL, MAX_LEVEL);
            std::process::exit(1);
        }
    };

    let time: f64 = match args[2].parse() {
        Ok(t) if t >= 0.0 => t,
        _ => {
            eprintln!("Error: time must be a non-negative number");
            std::process::exit(1);
        }
    };

    let elapsed: f64 = match args[3].parse() {
        Ok(t) => t,
        Err(_) => {
            eprintln!("Error: elapsed must be a number");
            std::process::exit(1);
        }
    };

    (level, time, elapsed)
}

fn print_outcome(label: &str, evaluation: &Evaluation) {
    println!();
    println!("{} answer ({}):", label, evaluation.grade.as_str());
    println!("  Points: {}", evaluation.points_awarded);
    println!("  New level: {}", evaluation.updated_card.level());
    println!(
        "  New baseline: {}",
        format_seconds(evaluation.updated_card.time())
    );
}
