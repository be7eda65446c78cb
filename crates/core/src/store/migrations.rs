//! Database schema migrations.
//!
//! Applied versions are recorded in `_migrations`. Each pending migration
//! runs in its own transaction together with its version row, so a failed
//! migration leaves neither schema changes nor a record behind.

use super::Error;
use tokio_rusqlite::{Connection, params, rusqlite};

/// A numbered schema change.
pub struct Migration {
    pub version: i64,
    pub sql: &'static str,
}

/// Known migrations, in strictly increasing version order.
pub const MIGRATIONS: &[Migration] = &[Migration { version: 1, sql: include_str!("../../migrations/001_snippets.sql") }];

/// Run any pending migrations.
///
/// # Errors
///
/// Returns `Error::MigrationFailed` naming the version whose SQL failed.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| apply(conn, MIGRATIONS)).await.map_err(Error::from)
}

fn apply(conn: &mut rusqlite::Connection, migrations: &[Migration]) -> Result<(), Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;

    let current: i64 = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?;

    for migration in migrations.iter().filter(|m| m.version > current) {
        let failed = |e: rusqlite::Error| Error::MigrationFailed(format!("version {}: {e}", migration.version));

        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql).map_err(failed)?;
        tx.execute(
            "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
            params![migration.version, chrono::Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        tracing::info!(version = migration.version, "applied migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().await.unwrap();
        run(&conn).await.unwrap();
        run(&conn).await.unwrap();

        let has_snippets: bool = conn
            .call(|conn| {
                conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='snippets')",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();

        assert!(has_snippets);
    }

    #[tokio::test]
    async fn test_migrations_version_tracking() {
        let conn = Connection::open_in_memory().await.unwrap();
        run(&conn).await.unwrap();

        let count: i64 = conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0)))
            .await
            .unwrap();

        assert_eq!(count, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_versions_strictly_increase() {
        assert!(MIGRATIONS.windows(2).all(|pair| pair[0].version < pair[1].version));
        assert!(MIGRATIONS.iter().all(|m| m.version > 0));
    }

    #[tokio::test]
    async fn test_failed_migration_rolls_back() {
        const BROKEN: &[Migration] = &[
            Migration { version: 1, sql: "CREATE TABLE first (id INTEGER);" },
            Migration { version: 2, sql: "CREATE TABLE second (id INTEGER); NOT VALID SQL;" },
        ];

        let conn = Connection::open_in_memory().await.unwrap();
        let result = conn.call(|conn| apply(conn, BROKEN)).await.map_err(Error::from);
        assert!(matches!(result, Err(Error::MigrationFailed(msg)) if msg.contains("version 2")));

        let (versions, has_second): (i64, bool) = conn
            .call(|conn| -> rusqlite::Result<(i64, bool)> {
                let versions = conn.query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))?;
                let has_second = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='second')",
                    [],
                    |row| row.get(0),
                )?;
                Ok((versions, has_second))
            })
            .await
            .unwrap();

        assert_eq!(versions, 1);
        assert!(!has_second);
    }
}
