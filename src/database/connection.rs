use log::{debug, error};
use rusqlite::Connection;
use rusqlite::Result;

refinery::embed_migrations!("migrations");

/// Opens the drill database and brings its schema up to date
pub fn init_connection(db_path: &str) -> Result<Connection> {
    let mut conn = Connection::open(db_path)?;

    match migrations::runner().run(&mut conn) {
        Ok(report) => {
            debug!(
                "Schema ready at {} ({} migrations applied)",
                db_path,
                report.applied_migrations().len()
            );
        }
        Err(e) => {
            error!("Schema migration failed for {}: {}", db_path, e);
            return Err(rusqlite::Error::InvalidQuery);
        }
    }

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_tables() {
        let conn = init_connection(":memory:").unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'refinery%' ORDER BY name")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(tables, vec!["cards", "game_history", "sqlite_sequence", "statistics"]);
    }
}
