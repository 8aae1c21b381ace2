use crate::card::Card;
use crate::config::NumberSelection;
use crate::error::StoreError;
use crate::history::{GameHistory, Statistics};
use std::collections::HashMap;

/// Persistence collaborator the drill engine reads from and commits to
///
/// Loads never fail: an unreadable store is treated like a first run and yields
/// empty or default values. Writes report their failure to the caller.
pub trait ProgressStore {
    /// Persisted cards of the selected tables, keyed by question
    fn load_deck(&self, select: &NumberSelection) -> HashMap<String, Card>;

    /// Writes the card's learning state, replacing any stored one
    fn save_card(&self, card: &Card) -> Result<(), StoreError>;

    /// Stores a freshly built card; a card already stored under its question is kept
    fn create_card(&self, card: &Card) -> Result<(), StoreError>;

    fn load_statistics(&self) -> Statistics;

    fn append_history(&self, entry: &GameHistory) -> Result<(), StoreError>;

    fn save_statistics(&self, stats: &Statistics) -> Result<(), StoreError>;

    /// Oldest first
    fn load_history(&self) -> Vec<GameHistory>;

    /// Writes a finished game's history entry and the updated statistics
    fn commit_game(&self, entry: &GameHistory, stats: &Statistics) -> Result<(), StoreError> {
        self.append_history(entry)?;
        self.save_statistics(stats)
    }
}
