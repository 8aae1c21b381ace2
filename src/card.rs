use crate::error::CardError;
use std::fmt;

/// Smallest factor drilled by the trainer
pub const MIN_FACTOR: u8 = 2;
/// Largest factor drilled by the trainer
pub const MAX_FACTOR: u8 = 9;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Response-time baseline given to a fact that was never answered
pub const DEFAULT_TIME_SECONDS: f64 = 60.0;

/// One multiplication fact together with its learning state
///
/// `level` and `time` only change through [`crate::evaluator::evaluate`];
/// persisted values come back in through [`Card::restore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    operand1: u8,
    operand2: u8,
    answer: i32,
    pub(crate) level: u8,
    pub(crate) time: f64,
}

impl Card {
    /// Creates a fresh card at level 1 with the default timing baseline
    pub fn new(operand1: u8, operand2: u8) -> Result<Self, CardError> {
        for operand in [operand1, operand2] {
            if !(MIN_FACTOR..=MAX_FACTOR).contains(&operand) {
                return Err(CardError::OperandOutOfRange(operand));
            }
        }

        Ok(Card {
            operand1,
            operand2,
            answer: operand1 as i32 * operand2 as i32,
            level: MIN_LEVEL,
            time: DEFAULT_TIME_SECONDS,
        })
    }

    /// Rebuilds a persisted card
    ///
    /// Levels outside 1..=5 are clamped and an unusable time falls back to the default.
    pub fn restore(operand1: u8, operand2: u8, level: u8, time: f64) -> Result<Self, CardError> {
        let mut card = Card::new(operand1, operand2)?;
        card.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        card.time = if time.is_finite() && time >= 0.0 {
            time
        } else {
            DEFAULT_TIME_SECONDS
        };
        Ok(card)
    }

    /// Question key and display text, e.g. `6×7`
    pub fn question(&self) -> String {
        question_key(self.operand1, self.operand2)
    }

    pub fn operands(&self) -> (u8, u8) {
        (self.operand1, self.operand2)
    }

    /// The multiplication table this fact belongs to
    pub fn table(&self) -> u8 {
        self.operand1
    }

    pub fn answer(&self) -> i32 {
        self.answer
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn check_answer(&self, answer: i32) -> bool {
        self.answer == answer
    }

    pub fn is_mastered(&self) -> bool {
        self.level == MAX_LEVEL
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.operand1, self.operand2)
    }
}

/// Builds the question key used to index persisted cards
pub fn question_key(operand1: u8, operand2: u8) -> String {
    format!("{}×{}", operand1, operand2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new(6, 7).unwrap();

        assert_eq!(card.operands(), (6, 7));
        assert_eq!(card.answer(), 42);
        assert_eq!(card.level(), 1);
        assert_eq!(card.time(), 60.0);
        assert_eq!(card.table(), 6);
    }

    #[test]
    fn test_question_format() {
        let card = Card::new(3, 4).unwrap();
        assert_eq!(card.question(), "3×4");
        assert_eq!(card.to_string(), "3×4");
    }

    #[test]
    fn test_ordered_pairs_are_distinct_facts() {
        let a = Card::new(3, 4).unwrap();
        let b = Card::new(4, 3).unwrap();
        assert_ne!(a.question(), b.question());
        assert_eq!(a.answer(), b.answer());
    }

    #[test]
    fn test_operands_out_of_range_rejected() {
        assert_eq!(Card::new(1, 5), Err(CardError::OperandOutOfRange(1)));
        assert_eq!(Card::new(5, 10), Err(CardError::OperandOutOfRange(10)));
        assert!(Card::new(2, 9).is_ok());
    }

    #[test]
    fn test_check_answer() {
        let card = Card::new(8, 9).unwrap();
        assert!(card.check_answer(72));
        assert!(!card.check_answer(73));
    }

    #[test]
    fn test_restore_keeps_valid_progress() {
        let card = Card::restore(5, 5, 4, 3.5).unwrap();
        assert_eq!(card.level(), 4);
        assert_eq!(card.time(), 3.5);
        assert!(!card.is_mastered());
    }

    #[test]
    fn test_restore_clamps_level_and_time() {
        let high = Card::restore(5, 5, 9, -1.0).unwrap();
        assert_eq!(high.level(), 5);
        assert_eq!(high.time(), DEFAULT_TIME_SECONDS);
        assert!(high.is_mastered());

        let low = Card::restore(5, 5, 0, f64::NAN).unwrap();
        assert_eq!(low.level(), 1);
        assert_eq!(low.time(), DEFAULT_TIME_SECONDS);
    }
}
