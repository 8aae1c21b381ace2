use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use rusqlite::Result;

pub struct StreakRepository<'a> {
    conn: &'a Connection,
}

impl<'a> StreakRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        StreakRepository { conn }
    }

    /// Number of consecutive days with at least one recorded game
    ///
    /// Counting starts at `today`, or at yesterday when nothing was played yet today.
    /// Returns 0 once a full day has been skipped.
    pub fn calculate_consecutive_days(&self, today: NaiveDate) -> Result<i32> {
        let dates = self.days_played_before(today)?;

        let Some(&latest) = dates.first() else {
            return Ok(0);
        };
        let mut expected = if latest == today {
            today
        } else if Some(latest) == today.pred_opt() {
            latest
        } else {
            return Ok(0);
        };

        let mut streak = 0;
        for date in dates {
            if date != expected {
                break;
            }
            streak += 1;
            match expected.pred_opt() {
                Some(previous) => expected = previous,
                None => break,
            }
        }

        Ok(streak)
    }

    /// Days with games in the ten days ending at `today`, most recent first
    pub fn days_with_games(&self, today: NaiveDate) -> Result<Vec<NaiveDate>> {
        let ten_days_ago = today - Duration::days(9);
        Ok(self
            .days_played_before(today)?
            .into_iter()
            .filter(|date| *date >= ten_days_ago)
            .collect())
    }

    fn days_played_before(&self, today: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT DISTINCT DATE(played_at) as game_date
            FROM game_history
            WHERE DATE(played_at) <= ?1
            ORDER BY game_date DESC"#,
        )?;

        let dates: Vec<String> = stmt
            .query_map([today.to_string()], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(dates
            .iter()
            .filter_map(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .collect())
    }
}
