use crate::card::{MAX_FACTOR, MIN_FACTOR};
use crate::config::{GameConfig, NumberSelection, SessionLength};
use crate::database::Database;
use crate::evaluator::AnswerGrade;
use crate::history::{GameHistory, Statistics};
use crate::selection::FocusType;
use crate::session::{AnswerOutcome, GameSession, NextStep};
use crate::store::ProgressStore;
use crate::time_format::{format_seconds, format_time_ago};
use eframe::egui;
use log::warn;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long Continue stays disabled after a wrong answer
pub const WRONG_ANSWER_COOLDOWN: Duration = Duration::from_secs(3);

/// How long the feedback for a correct answer stays before the next question
pub const CORRECT_ANSWER_DISPLAY: Duration = Duration::from_secs(3);

const RECENT_GAMES_SHOWN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Question,
    Feedback,
    GameOver,
}

#[derive(Debug, Clone)]
struct Feedback {
    question: String,
    outcome: AnswerOutcome,
    shown_at: Instant,
}

pub struct DrillApp {
    db: Arc<Database>,
    selection: NumberSelection,
    focus: FocusType,
    length: SessionLength,
    session: Option<GameSession>,
    answer_input: String,
    question_start_time: Option<Instant>,
    feedback: Option<Feedback>,
    screen: Screen,
    statistics: Statistics,
    recent_games: Vec<GameHistory>,
    wrong_answer_cooldown: Duration,
    correct_answer_display: Duration,
    error_message: Option<String>,
}

impl DrillApp {
    pub fn new(db: Arc<Database>, defaults: GameConfig) -> Self {
        let mut app = Self {
            db,
            selection: defaults.select,
            focus: defaults.focus,
            length: defaults.length,
            session: None,
            answer_input: String::new(),
            question_start_time: None,
            feedback: None,
            screen: Screen::Home,
            statistics: Statistics::default(),
            recent_games: Vec::new(),
            wrong_answer_cooldown: WRONG_ANSWER_COOLDOWN,
            correct_answer_display: CORRECT_ANSWER_DISPLAY,
            error_message: None,
        };
        app.refresh_progress();
        app
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.wrong_answer_cooldown = cooldown;
        self
    }

    pub fn with_correct_answer_display(mut self, display: Duration) -> Self {
        self.correct_answer_display = display;
        self
    }

    fn refresh_progress(&mut self) {
        self.statistics = self.db.load_statistics();
        let mut history = self.db.load_history();
        history.reverse();
        history.truncate(RECENT_GAMES_SHOWN);
        self.recent_games = history;
    }

    pub fn start_game(&mut self) {
        let config = GameConfig {
            select: self.selection.clone(),
            focus: self.focus,
            length: self.length,
        };
        let mut session = GameSession::new(self.db.clone(), self.db.clock());

        match session.start_session(config) {
            Ok(_) => {
                self.session = Some(session);
                self.error_message = None;
                self.feedback = None;
                self.show_question();
            }
            Err(e) => {
                warn!("Could not start game: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn show_question(&mut self) {
        self.answer_input.clear();
        self.question_start_time = Some(Instant::now());
        self.screen = Screen::Question;
    }

    fn submit_current_answer(&mut self) {
        if self.screen != Screen::Question {
            return;
        }
        let Ok(value) = self.answer_input.trim().parse::<i32>() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(question) = session.current_card().map(|card| card.question()) else {
            return;
        };

        let elapsed = self
            .question_start_time
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or(0.0);

        match session.submit_answer(value, elapsed) {
            Ok(outcome) => {
                self.error_message = None;
                self.feedback = Some(Feedback {
                    question,
                    outcome,
                    shown_at: Instant::now(),
                });
                self.screen = Screen::Feedback;
            }
            Err(e) => {
                warn!("Answer not saved: {}", e);
                self.error_message = Some(format!("Answer not saved, try again: {}", e));
            }
        }
    }

    /// Time left before Continue is enabled
    pub fn cooldown_remaining(&self) -> Duration {
        match &self.feedback {
            Some(feedback) if !feedback.outcome.is_correct => self
                .wrong_answer_cooldown
                .saturating_sub(feedback.shown_at.elapsed()),
            _ => Duration::ZERO,
        }
    }

    /// Time left before a correct answer's feedback moves on by itself
    pub fn auto_continue_remaining(&self) -> Option<Duration> {
        match &self.feedback {
            Some(feedback) if self.screen == Screen::Feedback && feedback.outcome.is_correct => {
                Some(
                    self.correct_answer_display
                        .saturating_sub(feedback.shown_at.elapsed()),
                )
            }
            _ => None,
        }
    }

    /// Continues once a correct answer has been shown long enough
    pub fn tick(&mut self) -> bool {
        match self.auto_continue_remaining() {
            Some(remaining) if remaining.is_zero() => self.continue_game(),
            _ => false,
        }
    }

    /// Leaves the feedback screen, returns whether it did
    pub fn continue_game(&mut self) -> bool {
        if self.screen != Screen::Feedback || !self.cooldown_remaining().is_zero() {
            return false;
        }
        let Some(feedback) = &self.feedback else {
            return false;
        };

        if feedback.outcome.next == NextStep::Finished {
            self.finish_game();
        } else {
            self.show_question();
        }
        true
    }

    fn finish_game(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if !session.is_recorded() {
                match session.record_result() {
                    Ok(stats) => self.statistics = stats,
                    Err(e) => {
                        warn!("Could not record game: {}", e);
                        self.error_message = Some(format!("Game not saved: {}", e));
                    }
                }
            }
        }
        self.refresh_progress();
        self.screen = Screen::GameOver;
    }

    pub fn return_home(&mut self) {
        self.session = None;
        self.feedback = None;
        self.answer_input.clear();
        self.error_message = None;
        self.refresh_progress();
        self.screen = Screen::Home;
    }

    // Helper methods for testing
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selection(&self) -> &NumberSelection {
        &self.selection
    }

    pub fn toggle_number(&mut self, number: u8) {
        self.selection = self.selection.toggled(number);
    }

    pub fn set_focus(&mut self, focus: FocusType) {
        self.focus = focus;
    }

    pub fn set_answer(&mut self, answer: String) {
        self.answer_input = answer;
    }

    pub fn submit_answer(&mut self) {
        self.submit_current_answer();
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.feedback.as_ref().map(|feedback| &feedback.outcome)
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn recent_games(&self) -> &[GameHistory] {
        &self.recent_games
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        ui.heading("Times Tables");
        ui.add_space(20.0);

        ui.label("Tables:");
        ui.horizontal(|ui| {
            for number in MIN_FACTOR..=MAX_FACTOR {
                let selected = self.selection.contains(number);
                let label = egui::RichText::new(number.to_string()).size(20.0);
                if ui.selectable_label(selected, label).clicked() {
                    self.toggle_number(number);
                }
            }
        });
        ui.add_space(10.0);

        ui.label("Focus:");
        ui.horizontal(|ui| {
            for focus in FocusType::ALL {
                ui.radio_value(&mut self.focus, focus, focus.label());
            }
        });
        ui.add_space(20.0);

        if ui.button("Start").clicked() {
            self.start_game();
        }
        ui.add_space(20.0);

        ui.label(format!("Games played: {}", self.statistics.games_played));
        ui.label(format!("Total points: {}", self.statistics.total_points));
        ui.label(format!(
            "Correct answers: {}",
            self.statistics.total_correct_answers
        ));

        if !self.recent_games.is_empty() {
            ui.add_space(10.0);
            ui.label("Recent games:");
            let now = self.db.clock().now();
            for game in &self.recent_games {
                ui.label(format!(
                    "{} | tables {} | {}/{} | {} points",
                    format_time_ago(game.date, now),
                    game.select,
                    game.correct_answers,
                    game.total_cards,
                    game.points
                ));
            }
        }
    }

    fn show_question_screen(&mut self, ui: &mut egui::Ui) {
        let Some(state) = self.session.as_ref().and_then(|session| session.state()) else {
            return;
        };

        ui.label(format!(
            "Question {} of {}",
            state.answered() + 1,
            state.target()
        ));
        ui.label(format!("Points: {}", state.points()));
        ui.add_space(20.0);

        ui.heading(
            egui::RichText::new(state.current_card().question())
                .size(40.0)
                .strong(),
        );
        ui.add_space(20.0);

        ui.horizontal(|ui| {
            ui.label("Your answer:");
            let response = ui.text_edit_singleline(&mut self.answer_input);

            if !response.lost_focus() {
                response.request_focus();
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit_current_answer();
            }
        });

        ui.add_space(10.0);

        if ui.button("Submit Answer").clicked() {
            self.submit_current_answer();
        }
    }

    fn show_feedback(&mut self, ui: &mut egui::Ui) {
        let Some(feedback) = self.feedback.clone() else {
            return;
        };
        let outcome = &feedback.outcome;

        if outcome.is_correct {
            let mut text = format!("Correct! +{} points", outcome.points_awarded);
            if outcome.grade == AnswerGrade::Faster {
                text.push_str(" (faster than usual)");
            }
            ui.heading(egui::RichText::new(text).color(egui::Color32::GREEN).strong());
        } else {
            ui.heading(
                egui::RichText::new("Wrong")
                    .color(egui::Color32::RED)
                    .strong(),
            );
            ui.label(
                egui::RichText::new(format!("{} = {}", feedback.question, outcome.correct_answer))
                    .size(32.0),
            );
        }
        ui.add_space(20.0);

        let remaining = self.cooldown_remaining();
        let can_continue = remaining.is_zero();
        if !can_continue {
            ui.ctx().request_repaint_after(remaining);
        }
        if let Some(auto) = self.auto_continue_remaining() {
            if self.tick() {
                return;
            }
            ui.ctx().request_repaint_after(auto);
        }

        let clicked = ui
            .add_enabled(can_continue, egui::Button::new("Continue"))
            .clicked();
        let enter = outcome.is_correct && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if clicked || enter {
            self.continue_game();
        }
    }

    fn show_game_over(&mut self, ui: &mut egui::Ui) {
        ui.heading("Game Over");
        ui.add_space(10.0);

        let Some(session) = self.session.as_ref() else {
            return;
        };
        if let Ok(result) = session.get_result() {
            ui.label(format!("Points: {}", result.points));
            ui.label(format!(
                "Correct answers: {} of {}",
                result.correct_answers, result.total_cards
            ));
        }
        ui.add_space(20.0);

        if let Some(state) = session.state() {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                for (i, result) in state.results().iter().enumerate() {
                    ui.horizontal(|ui| {
                        let status = if result.is_correct { "✓" } else { "✗" };
                        let color = if result.is_correct {
                            egui::Color32::GREEN
                        } else {
                            egui::Color32::RED
                        };

                        ui.label(format!("{}.", i + 1));
                        ui.label(format!("{} = {}", result.question, result.correct_answer));
                        ui.label(format!("(Your answer: {})", result.submitted));
                        ui.label(egui::RichText::new(status).color(color).strong());
                        ui.label(format_seconds(result.elapsed_seconds));
                    });
                }
            });
        }

        ui.add_space(20.0);

        if ui.button("Back to Home").clicked() {
            self.return_home();
        }
    }
}

impl eframe::App for DrillApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = &self.error_message {
                ui.label(egui::RichText::new(message).color(egui::Color32::RED));
                ui.add_space(10.0);
            }

            match self.screen {
                Screen::Home => self.show_home(ui),
                Screen::Question => self.show_question_screen(ui),
                Screen::Feedback => self.show_feedback(ui),
                Screen::GameOver => self.show_game_over(ui),
            }
        });
    }
}

pub fn run_app(db: Arc<Database>, defaults: GameConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([600.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Times Tables",
        options,
        Box::new(|_cc| Ok(Box::new(DrillApp::new(db, defaults)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> DrillApp {
        let db = Arc::new(Database::new(":memory:").unwrap());
        DrillApp::new(db, GameConfig::default())
    }

    fn answer_current(app: &mut DrillApp, correct: bool) {
        let card = app.session().unwrap().current_card().unwrap().clone();
        let value = if correct { card.answer() } else { card.answer() + 1 };
        app.set_answer(value.to_string());
        app.submit_answer();
    }

    #[test]
    fn test_toggle_from_all_selects_single_table() {
        let mut app = app();
        assert!(app.selection().is_all());

        app.toggle_number(4);
        assert_eq!(app.selection(), &NumberSelection::new([4]).unwrap());

        // the last table stays selected
        app.toggle_number(4);
        assert_eq!(app.selection(), &NumberSelection::new([4]).unwrap());

        app.toggle_number(6);
        assert_eq!(app.selection(), &NumberSelection::new([4, 6]).unwrap());
    }

    #[test]
    fn test_non_numeric_answer_is_ignored() {
        let mut app = app();
        app.start_game();
        app.set_answer("abc".to_string());
        app.submit_answer();

        assert_eq!(app.screen(), Screen::Question);
        assert_eq!(app.session().unwrap().state().unwrap().answered(), 0);
    }

    #[test]
    fn test_wrong_answer_blocks_continue_during_cooldown() {
        let mut app = app().with_cooldown(Duration::from_secs(60));
        app.start_game();
        answer_current(&mut app, false);

        assert_eq!(app.screen(), Screen::Feedback);
        assert!(!app.cooldown_remaining().is_zero());
        assert!(!app.continue_game());
        assert_eq!(app.screen(), Screen::Feedback);
    }

    #[test]
    fn test_correct_answer_moves_on_by_itself() {
        let mut app = app().with_correct_answer_display(Duration::ZERO);
        app.start_game();
        answer_current(&mut app, true);

        assert!(app.tick());
        assert_eq!(app.screen(), Screen::Question);
        assert_eq!(app.auto_continue_remaining(), None);
    }

    #[test]
    fn test_feedback_waits_before_moving_on() {
        let mut app = app()
            .with_cooldown(Duration::ZERO)
            .with_correct_answer_display(Duration::from_secs(60));
        app.start_game();
        answer_current(&mut app, true);
        assert!(!app.tick());
        assert_eq!(app.screen(), Screen::Feedback);
        assert!(app.continue_game());
    }

    #[test]
    fn test_wrong_answer_never_moves_on_by_itself() {
        let mut app = app()
            .with_cooldown(Duration::ZERO)
            .with_correct_answer_display(Duration::ZERO);
        app.start_game();
        answer_current(&mut app, false);
        assert_eq!(app.auto_continue_remaining(), None);
        assert!(!app.tick());
        assert_eq!(app.screen(), Screen::Feedback);
    }

    #[test]
    fn test_correct_answer_continues_immediately() {
        let mut app = app();
        app.start_game();
        answer_current(&mut app, true);

        assert_eq!(app.cooldown_remaining(), Duration::ZERO);
        assert!(app.continue_game());
        assert_eq!(app.screen(), Screen::Question);
    }
}
