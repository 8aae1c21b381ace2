use crate::config::NumberSelection;
use crate::error::StoreError;
use crate::store::ProgressStore;
use chrono::{DateTime, Utc};
use log::info;
use std::fmt;

/// Summary of one finished session
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub points: i32,
    pub correct_answers: i32,
    pub total_cards: i32,
    pub select: NumberSelection,
}

impl GameResult {
    pub fn accuracy_percentage(&self) -> f64 {
        percentage(self.correct_answers, self.total_cards)
    }
}

/// One completed session as kept in the history log
#[derive(Debug, Clone, PartialEq)]
pub struct GameHistory {
    pub date: DateTime<Utc>,
    pub select: NumberSelection,
    pub points: i32,
    pub correct_answers: i32,
    pub total_cards: i32,
}

impl GameHistory {
    pub fn from_result(result: &GameResult, date: DateTime<Utc>) -> Self {
        GameHistory {
            date,
            select: result.select.clone(),
            points: result.points,
            correct_answers: result.correct_answers,
            total_cards: result.total_cards,
        }
    }

    pub fn accuracy_percentage(&self) -> f64 {
        percentage(self.correct_answers, self.total_cards)
    }
}

impl fmt::Display for GameHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | tables {} | {}/{} correct | {} points",
            self.date.format("%Y-%m-%d %H:%M"),
            self.select,
            self.correct_answers,
            self.total_cards,
            self.points
        )
    }
}

/// Rolling totals over every recorded game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub games_played: i64,
    pub total_points: i64,
    pub total_correct_answers: i64,
}

impl Statistics {
    /// Folds one more game into the totals
    pub fn record(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_points += result.points as i64;
        self.total_correct_answers += result.correct_answers as i64;
    }

    /// Rebuilds the totals from the history log
    pub fn replay(history: &[GameHistory]) -> Self {
        history.iter().fold(Statistics::default(), |mut stats, game| {
            stats.games_played += 1;
            stats.total_points += game.points as i64;
            stats.total_correct_answers += game.correct_answers as i64;
            stats
        })
    }

    pub fn average_points(&self) -> f64 {
        if self.games_played > 0 {
            self.total_points as f64 / self.games_played as f64
        } else {
            0.0
        }
    }
}

/// Appends `result` to the history log and folds it into the statistics
///
/// Both writes go through [`ProgressStore::commit_game`] so a store can apply them together.
pub fn record_result(
    store: &dyn ProgressStore,
    result: &GameResult,
    date: DateTime<Utc>,
) -> Result<Statistics, StoreError> {
    let mut stats = store.load_statistics();
    stats.record(result);

    let entry = GameHistory::from_result(result, date);
    store.commit_game(&entry, &stats)?;

    info!(
        "Recorded game: tables {} | {}/{} correct | {} points | games played: {}",
        result.select, result.correct_answers, result.total_cards, result.points, stats.games_played
    );
    Ok(stats)
}

fn percentage(part: i32, total: i32) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
