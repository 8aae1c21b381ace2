//! Error types shared by the drill engine and its collaborators.

use thiserror::Error;

/// Errors emitted while building a [`Card`](crate::card::Card).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    #[error("operand {0} is outside the multiplication range 2..=9")]
    OperandOutOfRange(u8),
}

/// Invalid game or application configuration, rejected before a session starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("select at least one multiplication table")]
    EmptySelection,
    #[error("table {0} is outside the supported range 2..=9")]
    NumberOutOfRange(u8),
    #[error("invalid table list '{0}'")]
    InvalidSelection(String),
    #[error("a session needs at least one question")]
    NoQuestions,
    #[error("{0} questions is more than a session allows")]
    TooManyQuestions(usize),
    #[error("unknown focus '{0}', expected weak, strong or slow")]
    UnknownFocus(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// The selection strategy was asked to pick from a deck without cards.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no cards available to select from")]
pub struct EmptyDeckError;

/// Errors emitted by a persistence collaborator when a write fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("progress store unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by [`GameSession`](crate::session::GameSession).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    EmptyDeck(#[from] EmptyDeckError),
    #[error("cannot {action} while the session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("game result was already recorded")]
    AlreadyRecorded,
    #[error(transparent)]
    Store(#[from] StoreError),
}
