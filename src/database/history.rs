use crate::history::GameHistory;
use crate::row_factories::GameHistoryRowFactory;
use rusqlite::{Connection, Result, params};

pub struct HistoryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        HistoryRepository { conn }
    }

    pub fn insert(&self, entry: &GameHistory) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO game_history (played_at, selection, points, correct_answers, total_cards)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.date.to_rfc3339(),
                entry.select.to_storage_string(),
                entry.points,
                entry.correct_answers,
                entry.total_cards
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent games first
    pub fn recent(&self, limit: i32) -> Result<Vec<GameHistory>> {
        let mut stmt = self.conn.prepare(
            "SELECT played_at, selection, points, correct_answers, total_cards
             FROM game_history
             ORDER BY played_at DESC, id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit], GameHistoryRowFactory::from_row)?;
        rows.collect()
    }

    /// Every game, oldest first
    pub fn all(&self) -> Result<Vec<GameHistory>> {
        let mut stmt = self.conn.prepare(
            "SELECT played_at, selection, points, correct_answers, total_cards
             FROM game_history
             ORDER BY played_at ASC, id ASC",
        )?;

        let rows = stmt.query_map([], GameHistoryRowFactory::from_row)?;
        rows.collect()
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM game_history", [], |row| row.get(0))?;
        Ok(count)
    }
}
