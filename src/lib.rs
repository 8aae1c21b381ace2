pub mod card;
pub mod cli;
pub mod clock;
pub mod config;
pub mod database;
pub mod database_factory;
pub mod deck;
pub mod error;
pub mod evaluator;
pub mod gui;
pub mod history;
pub mod row_factories;
pub mod selection;
pub mod session;
pub mod store;
pub mod time_format;
