use crate::history::Statistics;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Reads and writes the single aggregate statistics row
pub struct StatisticsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> StatisticsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        StatisticsRepository { conn }
    }

    /// `None` until the first game is recorded
    pub fn get(&self) -> Result<Option<Statistics>> {
        self.conn
            .query_row(
                "SELECT games_played, total_points, total_correct_answers
                 FROM statistics WHERE id = 1",
                [],
                |row| {
                    Ok(Statistics {
                        games_played: row.get(0)?,
                        total_points: row.get(1)?,
                        total_correct_answers: row.get(2)?,
                    })
                },
            )
            .optional()
    }

    pub fn save(&self, stats: &Statistics) -> Result<()> {
        self.conn.execute(
            "INSERT INTO statistics (id, games_played, total_points, total_correct_answers)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                games_played = excluded.games_played,
                total_points = excluded.total_points,
                total_correct_answers = excluded.total_correct_answers",
            params![
                stats.games_played,
                stats.total_points,
                stats.total_correct_answers
            ],
        )?;
        Ok(())
    }
}
