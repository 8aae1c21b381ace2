pub mod mastery;
pub mod streak;

use rusqlite::Connection;

pub use mastery::{MasteryRepository, TableMastery};
pub use streak::StreakRepository;

/// Analytics facade providing high-level analytics operations
pub struct Analytics<'a> {
    pub conn: &'a Connection,
}

impl<'a> Analytics<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Analytics { conn }
    }

    pub fn mastery(&self) -> MasteryRepository<'a> {
        MasteryRepository::new(self.conn)
    }

    pub fn streak(&self) -> StreakRepository<'a> {
        StreakRepository::new(self.conn)
    }
}
