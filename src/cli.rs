use crate::config::{GameConfig, NumberSelection, SessionLength};
use crate::database_factory::DatabaseConfig;
use crate::error::ConfigError;
use crate::selection::FocusType;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Multiplication table drill trainer
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "Times Tables")]
#[command(about = "Drill the multiplication tables from 2 to 9", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(
        long,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,

    /// Tables preselected on the home screen, e.g. 2,3,5
    #[arg(long, value_name = "TABLES")]
    pub select: Option<String>,

    /// Which facts a game concentrates on
    #[arg(long, value_enum, default_value_t = FocusType::Weak)]
    pub focus: FocusType,

    /// Questions per game
    #[arg(long, value_name = "N", conflicts_with = "whole_deck")]
    pub questions: Option<usize>,

    /// Ask every fact of the selected tables once
    #[arg(long)]
    pub whole_deck: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, ConfigError> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ConfigError::InvalidDate(date_str.clone())),
            None => Ok(None),
        }
    }

    /// Game settings the home screen starts with
    pub fn game_defaults(&self) -> Result<GameConfig, ConfigError> {
        let select = match &self.select {
            Some(tables) => NumberSelection::parse(tables)?,
            None => NumberSelection::all(),
        };
        let length = if self.whole_deck {
            SessionLength::WholeDeck
        } else {
            self.questions
                .map(SessionLength::Questions)
                .unwrap_or_default()
        };

        let config = GameConfig {
            select,
            focus: self.focus,
            length,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn database_config(&self) -> Result<DatabaseConfig, ConfigError> {
        Ok(DatabaseConfig {
            is_test_mode: self.test,
            custom_path: self
                .db_path
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
            override_date: self.validate_override_date()?,
        })
    }
}
