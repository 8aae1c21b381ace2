use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use times_tables::card::Card;
use times_tables::config::NumberSelection;
use times_tables::database::Database;
use times_tables::history::{GameResult, record_result};
use times_tables::store::ProgressStore;

fn temp_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "drill_stats_{}_{}.db",
        name,
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drill_stats"))
        .args(args)
        .output()
        .expect("Failed to execute drill_stats")
}

fn seed(path: &PathBuf) {
    let db = Database::new(&path.to_string_lossy()).unwrap();
    db.save_card(&Card::restore(6, 7, 1, 14.0).unwrap()).unwrap();
    db.save_card(&Card::restore(6, 8, 5, 2.0).unwrap()).unwrap();
    db.save_card(&Card::restore(3, 3, 3, 4.5).unwrap()).unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 11, 12)
        .unwrap()
        .and_hms_opt(18, 5, 0)
        .unwrap()
        .and_utc();
    let result = GameResult {
        points: 90,
        correct_answers: 6,
        total_cards: 7,
        select: NumberSelection::new([3, 6]).unwrap(),
    };
    record_result(&db, &result, date).unwrap();
}

#[test]
fn test_drill_stats_no_color() {
    let path = temp_db("no_color");
    seed(&path);

    let output = run(&[path.to_str().unwrap(), "--no-color"]);
    let _ = fs::remove_file(&path);

    assert!(
        output.status.success(),
        "drill_stats failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    // the streak depends on today's date
    let report: String = stdout
        .lines()
        .filter(|line| !line.starts_with("Current streak"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string();

    insta::assert_snapshot!(report, @r"
    Multiplication Drill Report
    ===========================

    Games played:     1
    Total points:     90
    Correct answers:  6
    Average points:   90.0

    Recent games
    ------------------------------------------------------------
      2025-11-12 18:05 | tables 3, 6 | 6/7 correct | 90 points

    Mastery by table
    ------------------------------------------------------------
      Table 3: average level 3.0, 0/1 mastered, average time 4.5s
      Table 6: average level 3.0, 1/2 mastered, average time 8.0s

    Weakest facts
    ------------------------------------------------------------
      6×7 = 42  level 1/5  14.0s
      3×3 = 9  level 3/5  4.5s
      6×8 = 48  level 5/5  2.0s

    Slowest facts
    ------------------------------------------------------------
      6×7 = 42  level 1/5  14.0s
      3×3 = 9  level 3/5  4.5s
      6×8 = 48  level 5/5  2.0s
    ");
}

#[test]
fn test_drill_stats_empty_db() {
    let path = temp_db("empty");

    let output = run(&[path.to_str().unwrap()]);
    let _ = fs::remove_file(&path);

    assert!(
        output.status.success(),
        "drill_stats should succeed with empty database: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No games played yet."),
        "Expected message about no games, got: {}",
        stdout
    );
}

#[test]
fn test_drill_stats_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Analyzes multiplication drill progress"));
    assert!(stdout.contains("DATABASE_FILE"));
    assert!(stdout.contains("--no-color"));
}

#[test]
fn test_drill_stats_requires_database_argument() {
    let output = run(&[]);
    assert!(!output.status.success());
}
