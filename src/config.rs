use crate::card::{MAX_FACTOR, MIN_FACTOR};
use crate::error::ConfigError;
use crate::selection::FocusType;
use std::collections::BTreeSet;
use std::fmt;

/// Questions per game unless the caller asks for something else
pub const DEFAULT_QUESTIONS_PER_GAME: usize = 7;

/// Upper bound for `--questions`; keeps a game's points well inside `i32`
pub const MAX_QUESTIONS_PER_GAME: usize = 1000;

/// Non-empty set of multiplication tables in play, each in 2..=9
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSelection(BTreeSet<u8>);

impl NumberSelection {
    pub fn new<I: IntoIterator<Item = u8>>(numbers: I) -> Result<Self, ConfigError> {
        let mut selected = BTreeSet::new();
        for number in numbers {
            if !(MIN_FACTOR..=MAX_FACTOR).contains(&number) {
                return Err(ConfigError::NumberOutOfRange(number));
            }
            selected.insert(number);
        }

        if selected.is_empty() {
            return Err(ConfigError::EmptySelection);
        }
        Ok(NumberSelection(selected))
    }

    /// Every table from 2 to 9
    pub fn all() -> Self {
        NumberSelection((MIN_FACTOR..=MAX_FACTOR).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.0.contains(&number)
    }

    pub fn is_all(&self) -> bool {
        self.len() == (MIN_FACTOR..=MAX_FACTOR).count()
    }

    /// Applies a click on a table button
    ///
    /// With everything selected the clicked table becomes the only one; otherwise it is
    /// toggled, except that the last remaining table stays selected.
    pub fn toggled(&self, number: u8) -> Self {
        if !(MIN_FACTOR..=MAX_FACTOR).contains(&number) {
            return self.clone();
        }
        if self.is_all() {
            return NumberSelection(BTreeSet::from([number]));
        }

        let mut selected = self.0.clone();
        if selected.contains(&number) {
            if selected.len() > 1 {
                selected.remove(&number);
            }
        } else {
            selected.insert(number);
        }
        NumberSelection(selected)
    }

    /// Compact form used in the database, e.g. `2,3,5`
    pub fn to_storage_string(&self) -> String {
        self.iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let mut numbers = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let number = part
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidSelection(s.to_string()))?;
            numbers.push(number);
        }
        NumberSelection::new(numbers)
    }
}

impl Default for NumberSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for NumberSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", numbers.join(", "))
    }
}

/// When a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLength {
    /// A fixed number of answered questions; the deck cycles if it is smaller
    Questions(usize),
    /// Every fact of the deck exactly once
    WholeDeck,
}

impl SessionLength {
    /// Number of answers after which a session over `deck_size` cards finishes
    pub fn target(&self, deck_size: usize) -> usize {
        match self {
            SessionLength::Questions(count) => *count,
            SessionLength::WholeDeck => deck_size,
        }
    }
}

impl Default for SessionLength {
    fn default() -> Self {
        SessionLength::Questions(DEFAULT_QUESTIONS_PER_GAME)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub select: NumberSelection,
    pub focus: FocusType,
    pub length: SessionLength,
}

impl GameConfig {
    /// Builds a config for the given tables with the default session length
    pub fn new(select: &[u8], focus: FocusType) -> Result<Self, ConfigError> {
        Ok(GameConfig {
            select: NumberSelection::new(select.iter().copied())?,
            focus,
            length: SessionLength::default(),
        })
    }

    pub fn with_length(mut self, length: SessionLength) -> Self {
        self.length = length;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.length {
            SessionLength::Questions(0) => Err(ConfigError::NoQuestions),
            SessionLength::Questions(count) if count > MAX_QUESTIONS_PER_GAME => {
                Err(ConfigError::TooManyQuestions(count))
            }
            _ => Ok(()),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            select: NumberSelection::all(),
            focus: FocusType::default(),
            length: SessionLength::default(),
        }
    }
}
