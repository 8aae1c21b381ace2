use crate::card::{Card, MAX_LEVEL, MIN_LEVEL};

/// Points for a correct answer at level 1
pub const BASE_POINTS: i32 = 10;
/// Extra points at level 1 when the answer beats the card's timing baseline
pub const SPEED_BONUS_POINTS: i32 = 5;
/// Share of the previous timing baseline kept after a correct answer
pub const TIME_RETENTION: f64 = 0.7;

/// How an answer compared to what the card expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerGrade {
    /// Incorrect answer
    Wrong,
    /// Correct, but not faster than the card's baseline
    Slower,
    /// Correct and faster than the card's baseline
    Faster,
}

impl AnswerGrade {
    pub fn as_str(&self) -> &str {
        match self {
            AnswerGrade::Wrong => "wrong",
            AnswerGrade::Slower => "correct",
            AnswerGrade::Faster => "correct, faster than usual",
        }
    }
}

/// Outcome of answering one card
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub is_correct: bool,
    pub updated_card: Card,
    pub points_awarded: i32,
    pub grade: AnswerGrade,
}

/// Scores an answer and computes the card's new learning state
///
/// Correct answers raise the level (up to 5), pull the timing baseline towards the
/// elapsed time and earn `(10 + 5 if faster than the baseline) × level before the
/// answer`. Wrong answers lower the level (down to 1), keep the baseline and earn nothing.
pub fn evaluate(card: &Card, submitted_answer: i32, elapsed_seconds: f64) -> Evaluation {
    let mut updated_card = card.clone();

    if !card.check_answer(submitted_answer) {
        updated_card.level = card.level.saturating_sub(1).max(MIN_LEVEL);
        return Evaluation {
            is_correct: false,
            updated_card,
            points_awarded: 0,
            grade: AnswerGrade::Wrong,
        };
    }

    // a NaN/infinite measurement says nothing about speed
    let elapsed = elapsed_seconds.is_finite().then(|| elapsed_seconds.max(0.0));

    let grade = match elapsed {
        Some(elapsed) if elapsed < card.time => AnswerGrade::Faster,
        _ => AnswerGrade::Slower,
    };
    let per_level = match grade {
        AnswerGrade::Faster => BASE_POINTS + SPEED_BONUS_POINTS,
        _ => BASE_POINTS,
    };

    updated_card.level = (card.level + 1).min(MAX_LEVEL);
    if let Some(elapsed) = elapsed {
        updated_card.time = TIME_RETENTION * card.time + (1.0 - TIME_RETENTION) * elapsed;
    }

    Evaluation {
        is_correct: true,
        updated_card,
        points_awarded: per_level * card.level as i32,
        grade,
    }
}
