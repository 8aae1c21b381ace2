use crate::card::Card;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::deck::{build_deck, new_cards};
use crate::error::SessionError;
use crate::evaluator::{AnswerGrade, evaluate};
use crate::history::{self, GameResult, Statistics};
use crate::selection::select_next;
use crate::store::ProgressStore;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::mem;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Finished,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::NotStarted => "not started",
            SessionStatus::InProgress => "in progress",
            SessionStatus::Finished => "finished",
        }
    }
}

/// Result of answering a single question
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionResult {
    pub question: String,
    pub submitted: i32,
    pub correct_answer: i32,
    pub is_correct: bool,
    pub elapsed_seconds: f64,
    pub points_awarded: i32,
}

/// What the presentation shows after an answer
#[derive(Debug, Clone, PartialEq)]
pub enum NextStep {
    Card(Card),
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub points_awarded: i32,
    pub correct_answer: i32,
    pub grade: AnswerGrade,
    pub next: NextStep,
}

/// Mutable state of a running game
///
/// Holds its own copies of the deck's cards; the store only sees them through
/// explicit commits.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    deck: Vec<Card>,
    current: usize,
    answered: usize,
    target: usize,
    points: i32,
    correct_answers: i32,
    start_time: DateTime<Utc>,
    asked: HashSet<String>,
    results: Vec<QuestionResult>,
}

impl GameState {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn current_card(&self) -> &Card {
        &self.deck[self.current]
    }

    /// Number of questions answered so far
    pub fn answered(&self) -> usize {
        self.answered
    }

    /// Number of answers after which the game finishes
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn correct_answers(&self) -> i32 {
        self.correct_answers
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    fn result(&self) -> GameResult {
        GameResult {
            points: self.points,
            correct_answers: self.correct_answers,
            total_cards: i32::try_from(self.answered).unwrap_or(i32::MAX),
            select: self.config.select.clone(),
        }
    }
}

enum Phase {
    NotStarted,
    InProgress(GameState),
    Finished {
        state: GameState,
        result: GameResult,
        recorded: bool,
    },
}

/// Drives one game from the first card to the recorded result
pub struct GameSession {
    store: Arc<dyn ProgressStore>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    phase: Phase,
}

impl GameSession {
    pub fn new(store: Arc<dyn ProgressStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            rng: StdRng::from_entropy(),
            phase: Phase::NotStarted,
        }
    }

    /// Replaces the random source, e.g. with a seeded one in tests
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::NotStarted => SessionStatus::NotStarted,
            Phase::InProgress(_) => SessionStatus::InProgress,
            Phase::Finished { .. } => SessionStatus::Finished,
        }
    }

    /// Game state while running and after it finished
    pub fn state(&self) -> Option<&GameState> {
        match &self.phase {
            Phase::NotStarted => None,
            Phase::InProgress(state) | Phase::Finished { state, .. } => Some(state),
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        match &self.phase {
            Phase::InProgress(state) => Some(state.current_card()),
            _ => None,
        }
    }

    /// Builds the deck for `config`, stores its new cards and returns the first card
    pub fn start_session(&mut self, config: GameConfig) -> Result<Card, SessionError> {
        if !matches!(self.phase, Phase::NotStarted) {
            return Err(self.invalid("start_session"));
        }
        config.validate()?;

        let persisted = self.store.load_deck(&config.select);
        let deck = build_deck(&config.select, &persisted);
        let created = new_cards(&deck, &persisted);
        for card in &created {
            self.store.create_card(card)?;
        }
        debug!("Stored {} new cards", created.len());

        let first = select_next(&deck, config.focus, &HashSet::new(), &mut self.rng)?;
        let target = config.length.target(deck.len());
        let card = deck[first].clone();

        info!(
            "Game started: tables {} | focus {} | {} cards in deck | {} questions",
            config.select,
            config.focus.as_str(),
            deck.len(),
            target
        );

        self.phase = Phase::InProgress(GameState {
            asked: HashSet::from([card.question()]),
            config,
            deck,
            current: first,
            answered: 0,
            target,
            points: 0,
            correct_answers: 0,
            start_time: self.clock.now(),
            results: Vec::new(),
        });
        Ok(card)
    }

    /// Scores the answer to the current card and moves on
    ///
    /// The updated card is committed to the store first. If that write fails the
    /// session is left untouched and the same answer can be submitted again.
    pub fn submit_answer(
        &mut self,
        value: i32,
        elapsed_seconds: f64,
    ) -> Result<AnswerOutcome, SessionError> {
        let current_status = self.status().as_str();
        let Phase::InProgress(state) = &mut self.phase else {
            return Err(SessionError::InvalidTransition {
                action: "submit_answer",
                state: current_status,
            });
        };

        let card = &state.deck[state.current];
        let evaluation = evaluate(card, value, elapsed_seconds);
        self.store.save_card(&evaluation.updated_card)?;

        debug!(
            "Answer: {} = {} | {} | {} points | level {} -> {}",
            card.question(),
            value,
            evaluation.grade.as_str(),
            evaluation.points_awarded,
            card.level(),
            evaluation.updated_card.level()
        );

        let correct_answer = card.answer();
        state.results.push(QuestionResult {
            question: card.question(),
            submitted: value,
            correct_answer,
            is_correct: evaluation.is_correct,
            elapsed_seconds,
            points_awarded: evaluation.points_awarded,
        });
        state.deck[state.current] = evaluation.updated_card;
        state.points += evaluation.points_awarded;
        if evaluation.is_correct {
            state.correct_answers += 1;
        }
        state.answered += 1;

        let next = if state.answered >= state.target {
            NextStep::Finished
        } else {
            // a finished cycle starts over, but not with the card just answered
            let next = if state.asked.len() >= state.deck.len() {
                state.asked.clear();
                let mut just_answered = HashSet::new();
                if state.deck.len() > 1 {
                    just_answered.insert(state.deck[state.current].question());
                }
                select_next(&state.deck, state.config.focus, &just_answered, &mut self.rng)?
            } else {
                select_next(&state.deck, state.config.focus, &state.asked, &mut self.rng)?
            };
            state.asked.insert(state.deck[next].question());
            state.current = next;
            NextStep::Card(state.deck[next].clone())
        };

        if next == NextStep::Finished {
            self.finish();
        }

        Ok(AnswerOutcome {
            is_correct: evaluation.is_correct,
            points_awarded: evaluation.points_awarded,
            correct_answer,
            grade: evaluation.grade,
            next,
        })
    }

    pub fn get_result(&self) -> Result<&GameResult, SessionError> {
        match &self.phase {
            Phase::Finished { result, .. } => Ok(result),
            _ => Err(self.invalid("get_result")),
        }
    }

    /// Appends the finished game to the history and updates the statistics, once
    pub fn record_result(&mut self) -> Result<Statistics, SessionError> {
        let current_status = self.status().as_str();
        match &mut self.phase {
            Phase::Finished { recorded: true, .. } => Err(SessionError::AlreadyRecorded),
            Phase::Finished {
                result, recorded, ..
            } => {
                let stats = history::record_result(&*self.store, result, self.clock.now())?;
                *recorded = true;
                Ok(stats)
            }
            _ => Err(SessionError::InvalidTransition {
                action: "record_result",
                state: current_status,
            }),
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self.phase, Phase::Finished { recorded: true, .. })
    }

    fn finish(&mut self) {
        if let Phase::InProgress(state) = mem::replace(&mut self.phase, Phase::NotStarted) {
            let result = state.result();
            info!(
                "Game finished: {}/{} correct | {} points | {}s",
                result.correct_answers,
                result.total_cards,
                result.points,
                (self.clock.now() - state.start_time).num_seconds()
            );
            self.phase = Phase::Finished {
                state,
                result,
                recorded: false,
            };
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.status().as_str(),
        }
    }
}
