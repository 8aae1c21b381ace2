use chrono::{NaiveDate, Utc};
use times_tables::card::Card;
use times_tables::config::NumberSelection;
use times_tables::database::{CardsRepository, Database, HistoryRepository};
use times_tables::deck::{build_deck, new_cards};
use times_tables::evaluator::evaluate;
use times_tables::history::{GameResult, Statistics, record_result};
use times_tables::store::ProgressStore;

#[test]
fn test_store_and_retrieve_card() {
    let db = Database::new(":memory:").unwrap();
    let card = Card::new(6, 7).unwrap();

    let repo = CardsRepository::new(&db.conn, Box::new(Utc::now));
    repo.upsert(&card).unwrap();

    let stored = repo.get("6×7").unwrap().unwrap();
    assert_eq!(stored.operands(), (6, 7));
    assert_eq!(stored.answer(), 42);
    assert_eq!(stored.level(), 1);
    assert_eq!(stored.time(), 60.0);
}

#[test]
fn test_learning_state_round_trips_through_store() {
    let db = Database::new(":memory:").unwrap();
    let mut card = Card::new(8, 9).unwrap();
    for elapsed in [12.0, 7.5, 4.25] {
        card = evaluate(&card, 72, elapsed).updated_card;
    }
    db.save_card(&card).unwrap();

    let deck = db.load_deck(&NumberSelection::new([8]).unwrap());
    let stored = &deck["8×9"];
    assert_eq!(stored.level(), 4);
    assert!((stored.time() - card.time()).abs() < 1e-9);
}

#[test]
fn test_first_run_defaults() {
    let db = Database::new(":memory:").unwrap();

    assert!(db.load_deck(&NumberSelection::all()).is_empty());
    assert_eq!(db.load_statistics(), Statistics::default());
    assert!(db.load_history().is_empty());
}

#[test]
fn test_deck_reuses_persisted_progress() {
    let db = Database::new(":memory:").unwrap();
    db.save_card(&Card::restore(3, 4, 4, 2.5).unwrap()).unwrap();
    db.save_card(&Card::restore(5, 5, 5, 1.0).unwrap()).unwrap();

    let select = NumberSelection::new([3]).unwrap();
    let persisted = db.load_deck(&select);
    let deck = build_deck(&select, &persisted);

    assert_eq!(deck.len(), 8);
    let known = deck.iter().find(|card| card.question() == "3×4").unwrap();
    assert_eq!(known.level(), 4);
    assert_eq!(new_cards(&deck, &persisted).len(), 7);
    assert!(deck.iter().all(|card| card.table() == 3));
}

#[test]
fn test_recorded_games_accumulate() {
    let db = Database::new(":memory:").unwrap();
    let select = NumberSelection::new([2, 9]).unwrap();
    let day = |d: u32| {
        NaiveDate::from_ymd_opt(2025, 11, d)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
            .and_utc()
    };

    let first = GameResult {
        points: 90,
        correct_answers: 6,
        total_cards: 7,
        select: select.clone(),
    };
    let second = GameResult {
        points: 25,
        correct_answers: 2,
        total_cards: 7,
        select,
    };
    record_result(&db, &first, day(3)).unwrap();
    let stats = record_result(&db, &second, day(4)).unwrap();

    assert_eq!(
        stats,
        Statistics {
            games_played: 2,
            total_points: 115,
            total_correct_answers: 8,
        }
    );
    assert_eq!(db.load_statistics(), stats);

    let history = HistoryRepository::new(&db.conn).all().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].points, 90);
    assert_eq!(history[1].select.to_storage_string(), "2,9");
    assert_eq!(Statistics::replay(&history), stats);
}
