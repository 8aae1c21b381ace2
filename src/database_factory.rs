use crate::clock::{Clock, OverrideDateClock, SystemClock};
use crate::database::Database;
use chrono::NaiveDate;
use rusqlite::Result;
use std::sync::Arc;

/// Database file used when no path is given
pub const DEFAULT_DB_PATH: &str = "times_tables.db";

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Whether to use in-memory database
    pub is_test_mode: bool,
    /// Custom database file path (ignored if in test mode)
    pub custom_path: Option<String>,
    /// Pretend today is this date
    pub override_date: Option<NaiveDate>,
}

impl DatabaseConfig {
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    /// Gets the effective database path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_DB_PATH)
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.override_date {
            Some(date) => Arc::new(OverrideDateClock::new(date)),
            None => Arc::new(SystemClock),
        }
    }
}

#[derive(Debug, Default)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    pub fn test_mode(mut self) -> Self {
        self.config.is_test_mode = true;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.custom_path = Some(path.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.config.override_date = Some(date);
        self
    }

    /// Invalid dates are ignored
    pub fn date_ymd(self, year: i32, month: u32, day: u32) -> Self {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => self.date(date),
            None => self,
        }
    }

    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}

/// Factory for creating Database instances
pub struct DatabaseFactory;

impl DatabaseFactory {
    /// Creates a database with the specified configuration
    pub fn create(config: DatabaseConfig) -> Result<Database> {
        Database::with_clock(config.get_path(), config.clock())
    }
}
