pub mod analytics;
pub mod cards;
pub mod connection;
pub mod history;
pub mod statistics;

use crate::card::Card;
use crate::clock::{Clock, SystemClock};
use crate::config::NumberSelection;
use crate::error::StoreError;
use crate::history::{GameHistory, Statistics};
use crate::store::ProgressStore;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use rusqlite::{Connection, Result};
use std::collections::HashMap;
use std::sync::Arc;

pub use analytics::{Analytics, TableMastery};
pub use cards::CardsRepository;
pub use history::HistoryRepository;
pub use statistics::StatisticsRepository;

/// Main Database struct providing access to all repositories
pub struct Database {
    pub conn: Connection,
    clock: Arc<dyn Clock>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self> {
        Self::init(db_path, Arc::new(SystemClock))
    }

    pub fn with_clock(db_path: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::init(db_path, clock)
    }

    fn init(db_path: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Database { conn, clock })
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    fn get_current_time(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn cards(&self) -> CardsRepository<'_> {
        CardsRepository::new(&self.conn, Box::new(|| self.get_current_time()))
    }

    // ===== Cards Repository Access =====

    pub fn upsert_card(&self, card: &Card) -> Result<()> {
        self.cards().upsert(card)
    }

    pub fn insert_card(&self, card: &Card) -> Result<bool> {
        self.cards().insert_new(card)
    }

    pub fn get_cards_for_table(&self, table: u8) -> Result<Vec<Card>> {
        self.cards().for_table(table)
    }

    pub fn get_weakest_cards(&self, limit: i32) -> Result<Vec<Card>> {
        self.cards().weakest(limit)
    }

    pub fn get_slowest_cards(&self, limit: i32) -> Result<Vec<Card>> {
        self.cards().slowest(limit)
    }

    pub fn count_cards(&self) -> Result<i64> {
        self.cards().count()
    }

    // ===== History Repository Access =====

    pub fn insert_game(&self, entry: &GameHistory) -> Result<i64> {
        HistoryRepository::new(&self.conn).insert(entry)
    }

    pub fn get_recent_games(&self, limit: i32) -> Result<Vec<GameHistory>> {
        HistoryRepository::new(&self.conn).recent(limit)
    }

    pub fn get_all_games(&self) -> Result<Vec<GameHistory>> {
        HistoryRepository::new(&self.conn).all()
    }

    pub fn count_games(&self) -> Result<i64> {
        HistoryRepository::new(&self.conn).count()
    }

    // ===== Statistics Repository Access =====

    pub fn get_statistics(&self) -> Result<Option<Statistics>> {
        StatisticsRepository::new(&self.conn).get()
    }

    pub fn save_statistics_row(&self, stats: &Statistics) -> Result<()> {
        StatisticsRepository::new(&self.conn).save(stats)
    }

    // ===== Analytics Access =====

    pub fn compute_table_mastery(&self) -> Result<Vec<TableMastery>> {
        Analytics::new(&self.conn).mastery().per_table()
    }

    pub fn compute_streak(&self) -> Result<i32> {
        Analytics::new(&self.conn)
            .streak()
            .calculate_consecutive_days(self.clock.today())
    }
}

impl ProgressStore for Database {
    fn load_deck(&self, select: &NumberSelection) -> HashMap<String, Card> {
        let mut deck = HashMap::new();
        for table in select.iter() {
            match self.get_cards_for_table(table) {
                Ok(cards) => deck.extend(cards.into_iter().map(|card| (card.question(), card))),
                Err(e) => warn!("Could not load cards for table {}: {}", table, e),
            }
        }
        deck
    }

    fn save_card(&self, card: &Card) -> std::result::Result<(), StoreError> {
        self.upsert_card(card)?;
        debug!(
            "Saved card {} | level {} | time {:.2}s",
            card.question(),
            card.level(),
            card.time()
        );
        Ok(())
    }

    fn create_card(&self, card: &Card) -> std::result::Result<(), StoreError> {
        if !self.insert_card(card)? {
            debug!("Card {} already stored, keeping its progress", card.question());
        }
        Ok(())
    }

    fn load_statistics(&self) -> Statistics {
        match self.get_statistics() {
            Ok(stats) => stats.unwrap_or_default(),
            Err(e) => {
                warn!("Could not load statistics, starting from zero: {}", e);
                Statistics::default()
            }
        }
    }

    fn append_history(&self, entry: &GameHistory) -> std::result::Result<(), StoreError> {
        self.insert_game(entry)?;
        Ok(())
    }

    fn save_statistics(&self, stats: &Statistics) -> std::result::Result<(), StoreError> {
        self.save_statistics_row(stats)?;
        Ok(())
    }

    fn load_history(&self) -> Vec<GameHistory> {
        self.get_all_games().unwrap_or_else(|e| {
            warn!("Could not load game history: {}", e);
            Vec::new()
        })
    }

    /// Both rows land together or not at all
    fn commit_game(
        &self,
        entry: &GameHistory,
        stats: &Statistics,
    ) -> std::result::Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        HistoryRepository::new(&tx).insert(entry)?;
        StatisticsRepository::new(&tx).save(stats)?;
        tx.commit()?;
        debug!("Committed game history and statistics");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::database_factory::{DatabaseConfig, DatabaseFactory};
    use crate::history::{GameResult, record_result};
    use chrono::NaiveDate;

    fn create_test_db() -> Database {
        // Use an in-memory database for each test
        Database::new(":memory:").expect("Failed to create test database")
    }

    fn result(points: i32, correct: i32) -> GameResult {
        GameResult {
            points,
            correct_answers: correct,
            total_cards: 7,
            select: NumberSelection::new([4]).unwrap(),
        }
    }

    #[test]
    fn test_database_creation() {
        let db = create_test_db();
        assert_eq!(db.count_cards().unwrap(), 0);
        assert_eq!(db.count_games().unwrap(), 0);
        assert_eq!(db.load_statistics(), Statistics::default());
    }

    #[test]
    fn test_load_deck_only_returns_selected_tables() {
        let db = create_test_db();
        for (x, y) in [(2, 3), (4, 3), (4, 9), (8, 8)] {
            db.save_card(&Card::new(x, y).unwrap()).unwrap();
        }

        let deck = db.load_deck(&NumberSelection::new([4, 8]).unwrap());

        let mut keys: Vec<&String> = deck.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["4×3", "4×9", "8×8"]);
    }

    #[test]
    fn test_create_card_does_not_reset_progress() {
        let db = create_test_db();
        db.save_card(&Card::restore(6, 3, 4, 5.5).unwrap()).unwrap();

        db.create_card(&Card::new(6, 3).unwrap()).unwrap();

        let deck = db.load_deck(&NumberSelection::new([6]).unwrap());
        assert_eq!(deck["6×3"].level(), 4);
        assert_eq!(db.count_cards().unwrap(), 1);
    }

    #[test]
    fn test_commit_game_writes_both_rows() {
        let db = create_test_db();
        let stats = record_result(&db, &result(90, 6), Utc::now()).unwrap();

        assert_eq!(stats.games_played, 1);
        assert_eq!(db.count_games().unwrap(), 1);
        assert_eq!(db.load_statistics(), stats);
        assert_eq!(Statistics::replay(&db.load_history()), stats);
    }

    #[test]
    fn test_commit_game_rolls_back_on_failure() {
        let db = create_test_db();
        db.conn.execute("DROP TABLE statistics", []).unwrap();

        let outcome = record_result(&db, &result(90, 6), Utc::now());

        assert!(matches!(outcome, Err(StoreError::Sqlite(_))));
        assert_eq!(db.count_games().unwrap(), 0);
    }

    #[test]
    fn test_clock_stamps_cards() {
        let instant = NaiveDate::from_ymd_opt(2025, 11, 12)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            .and_utc();
        let db = Database::with_clock(":memory:", Arc::new(FixedClock(instant))).unwrap();
        db.save_card(&Card::new(5, 5).unwrap()).unwrap();

        let updated_at: String = db
            .conn
            .query_row("SELECT updated_at FROM cards", [], |row| row.get(0))
            .unwrap();
        assert_eq!(updated_at, "2025-11-12T08:00:00+00:00");
    }

    #[test]
    fn test_streak_uses_overridden_date() {
        let db_config = DatabaseConfig::builder()
            .test_mode()
            .date_ymd(2025, 11, 12)
            .build();
        let db = DatabaseFactory::create(db_config).unwrap();
        record_result(&db, &result(30, 2), db.clock().now()).unwrap();

        assert_eq!(db.compute_streak().unwrap(), 1);
        let days = Analytics::new(&db.conn)
            .streak()
            .days_with_games(db.clock().today())
            .unwrap();
        assert_eq!(days, vec![NaiveDate::from_ymd_opt(2025, 11, 12).unwrap()]);
    }
}
