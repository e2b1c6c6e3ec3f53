//! Migration runner
//!
//! Applies migrations in order, each in its own transaction, and records
//! them in `schema_version` with a checksum.

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{get_migrations, Migration};
use rusqlite::{Connection, OptionalExtension};

/// Apply all pending migrations to the database
///
/// Already-applied migrations are skipped after their checksum is verified.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for migration in get_migrations() {
        let tx = conn.transaction().map_err(from_rusqlite)?;
        apply_migration(&tx, &migration)?;
        tx.commit().map_err(from_rusqlite)?;
    }

    Ok(())
}

/// Drop every table, then recreate the schema from the embedded migrations
///
/// Runs in a single transaction: on failure the old schema and data remain.
pub fn reset_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;

    let tables: Vec<String> = {
        let mut stmt = tx
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            )
            .map_err(from_rusqlite)?;
        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        names
    };

    for table in &tables {
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS \"{}\"",
            table.replace('"', "\"\"")
        ))
        .map_err(from_rusqlite)?;
    }

    tracing::debug!(dropped = tables.len(), "schema dropped");

    create_schema_version_table(&tx)?;
    for migration in get_migrations() {
        apply_migration(&tx, &migration)?;
    }

    tx.commit().map_err(from_rusqlite)?;

    Ok(())
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied
///
/// The caller owns the transaction.
fn apply_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    let checksum = compute_checksum(migration.sql);

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    match recorded {
        Some(Some(stored)) if stored != checksum => {
            return Err(checksum_mismatch(migration.id, &stored, &checksum));
        }
        Some(_) => return Ok(()),
        None => {}
    }

    conn.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, e))?;

    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration.id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tracing::debug!(migration_id = migration.id, "migration applied");

    Ok(())
}
