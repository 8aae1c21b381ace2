use crate::card::MAX_LEVEL;
use rusqlite::Connection;
use rusqlite::Result;

/// Learning progress on one multiplication table
#[derive(Debug, Clone, PartialEq)]
pub struct TableMastery {
    pub table: u8,
    pub cards_seen: i64,
    pub average_level: f64,
    pub mastered: i64,
    pub average_time_seconds: f64,
}

pub struct MasteryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> MasteryRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        MasteryRepository { conn }
    }

    /// One entry per table that has stored cards, ascending
    pub fn per_table(&self) -> Result<Vec<TableMastery>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT
                operand1,
                COUNT(*) as cards_seen,
                AVG(level) as average_level,
                COUNT(CASE WHEN level >= ?1 THEN 1 END) as mastered,
                AVG(time_seconds) as average_time
            FROM cards
            GROUP BY operand1
            ORDER BY operand1"#,
        )?;

        let rows = stmt.query_map([MAX_LEVEL], |row| {
            Ok(TableMastery {
                table: row.get(0)?,
                cards_seen: row.get(1)?,
                average_level: row.get(2)?,
                mastered: row.get(3)?,
                average_time_seconds: row.get(4)?,
            })
        })?;
        rows.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::database::cards::CardsRepository;
    use crate::database::connection::init_connection;
    use chrono::Utc;

    #[test]
    fn test_per_table() {
        let conn = init_connection(":memory:").unwrap();
        let cards = CardsRepository::new(&conn, Box::new(Utc::now));
        cards.upsert(&Card::restore(3, 2, 5, 2.0).unwrap()).unwrap();
        cards.upsert(&Card::restore(3, 3, 2, 6.0).unwrap()).unwrap();
        cards.upsert(&Card::restore(7, 7, 1, 60.0).unwrap()).unwrap();

        let mastery = MasteryRepository::new(&conn).per_table().unwrap();

        assert_eq!(mastery.len(), 2);
        assert_eq!(mastery[0].table, 3);
        assert_eq!(mastery[0].cards_seen, 2);
        assert!((mastery[0].average_level - 3.5).abs() < 1e-9);
        assert_eq!(mastery[0].mastered, 1);
        assert!((mastery[0].average_time_seconds - 4.0).abs() < 1e-9);
        assert_eq!(mastery[1].table, 7);
        assert_eq!(mastery[1].mastered, 0);
    }

    #[test]
    fn test_empty() {
        let conn = init_connection(":memory:").unwrap();
        assert!(MasteryRepository::new(&conn).per_table().unwrap().is_empty());
    }
}
