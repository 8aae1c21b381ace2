use crate::card::Card;
use crate::row_factories::CardRowFactory;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

pub struct CardsRepository<'a> {
    conn: &'a Connection,
    get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
}

impl<'a> CardsRepository<'a> {
    pub fn new(
        conn: &'a Connection,
        get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
    ) -> Self {
        CardsRepository {
            conn,
            get_current_time,
        }
    }

    /// Inserts the card or overwrites its learning state
    pub fn upsert(&self, card: &Card) -> Result<()> {
        let (operand1, operand2) = card.operands();
        let now_utc = (self.get_current_time)().to_rfc3339();
        self.conn.execute(
            "INSERT INTO cards (question, operand1, operand2, answer, level, time_seconds, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(question) DO UPDATE SET
                level = excluded.level,
                time_seconds = excluded.time_seconds,
                updated_at = excluded.updated_at",
            params![
                card.question(),
                operand1,
                operand2,
                card.answer(),
                card.level(),
                card.time(),
                now_utc
            ],
        )?;
        Ok(())
    }

    /// Inserts the card unless its question is already stored; returns whether it was
    pub fn insert_new(&self, card: &Card) -> Result<bool> {
        let (operand1, operand2) = card.operands();
        let now_utc = (self.get_current_time)().to_rfc3339();
        let inserted = self.conn.execute(
            "INSERT INTO cards (question, operand1, operand2, answer, level, time_seconds, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(question) DO NOTHING",
            params![
                card.question(),
                operand1,
                operand2,
                card.answer(),
                card.level(),
                card.time(),
                now_utc
            ],
        )?;
        Ok(inserted > 0)
    }

    pub fn get(&self, question: &str) -> Result<Option<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT operand1, operand2, level, time_seconds FROM cards WHERE question = ?1",
        )?;

        let mut rows = stmt.query([question])?;

        if let Some(row) = rows.next()? {
            Ok(Some(CardRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Cards of one multiplication table, by second factor
    pub fn for_table(&self, table: u8) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT operand1, operand2, level, time_seconds
             FROM cards
             WHERE operand1 = ?1
             ORDER BY operand2",
        )?;

        let rows = stmt.query_map([table], CardRowFactory::from_row)?;
        rows.collect()
    }

    /// Lowest levels first, slower facts breaking ties
    pub fn weakest(&self, limit: i32) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT operand1, operand2, level, time_seconds
             FROM cards
             ORDER BY level ASC, time_seconds DESC, operand1, operand2
             LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit], CardRowFactory::from_row)?;
        rows.collect()
    }

    pub fn slowest(&self, limit: i32) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT operand1, operand2, level, time_seconds
             FROM cards
             ORDER BY time_seconds DESC, operand1, operand2
             LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit], CardRowFactory::from_row)?;
        rows.collect()
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count)
    }
}
