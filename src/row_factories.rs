use crate::card::Card;
use crate::config::NumberSelection;
use crate::history::GameHistory;
use chrono::{DateTime, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

/// Factory for creating Card objects from database rows
pub struct CardRowFactory;

impl CardRowFactory {
    /// Expected columns: operand1, operand2, level, time_seconds
    pub fn from_row(row: &Row) -> rusqlite::Result<Card> {
        let operand1: u8 = row.get(0)?;
        let operand2: u8 = row.get(1)?;
        let level: u8 = row.get(2)?;
        let time: f64 = row.get(3)?;

        Card::restore(operand1, operand2, level, time)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(e)))
    }
}

/// Factory for creating GameHistory objects from database rows
pub struct GameHistoryRowFactory;

impl GameHistoryRowFactory {
    /// Expected columns: played_at, selection, points, correct_answers, total_cards
    pub fn from_row(row: &Row) -> rusqlite::Result<GameHistory> {
        let played_at: String = row.get(0)?;
        let date = DateTime::parse_from_rfc3339(&played_at)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?
            .with_timezone(&Utc);

        let selection: String = row.get(1)?;
        let select = NumberSelection::parse(&selection)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

        Ok(GameHistory {
            date,
            select,
            points: row.get(2)?,
            correct_answers: row.get(3)?,
            total_cards: row.get(4)?,
        })
    }
}
