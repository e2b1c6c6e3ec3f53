//! Session gateway
//!
//! A `Session` owns one SQLite connection for the lifetime of one command.
//! Each mutation runs in its own transaction; a transaction that is
//! dropped without `commit` rolls back, so early returns and panics never
//! leave partial writes behind.

use crate::db;
use crate::errors::{from_rusqlite, unique_violation, Result};
use crate::migrations;
use crate::sql::select_users;
use rusqlite::{params_from_iter, Connection, Row};
use std::path::Path;
use std::time::{Duration, Instant};
use userctl_core::errors::UserError;
use userctl_core::model::{NewUser, User};
use userctl_core::queries::UserQuery;
use userctl_core::{log_op_end, log_op_error, log_op_start};

/// Tagged result of a single-row write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Committed; carries the row as stored
    Applied(User),
    /// A UNIQUE constraint rejected the write and it was rolled back
    DuplicateKey { field: String },
}

/// Connection settings for a session
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub busy_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            busy_timeout: db::DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// One unit of work against the user store
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Open the database file, configure it, and bring the schema up to date
    pub fn open<P: AsRef<Path>>(path: P, options: SessionOptions) -> Result<Self> {
        let conn = db::open(path)?;
        Self::from_connection(conn, options)
    }

    /// Open and configure without touching the schema
    ///
    /// For `reset_schema` only: whatever tables the file holds (a foreign
    /// `users` table, a ledger with stale checksums) are dropped by the
    /// reset instead of failing migration first. Other operations on a
    /// session opened this way see the schema as it is on disk.
    pub fn open_for_reset<P: AsRef<Path>>(path: P, options: SessionOptions) -> Result<Self> {
        let conn = db::open(path)?;
        db::configure(&conn, options.busy_timeout)?;
        Ok(Self { conn })
    }

    /// Fresh in-memory store with the schema applied (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Self::from_connection(conn, SessionOptions::default())
    }

    fn from_connection(mut conn: Connection, options: SessionOptions) -> Result<Self> {
        db::configure(&conn, options.busy_timeout)?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Underlying connection, for inspection in tests and tooling
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Drop every table and recreate the schema. All users are lost.
    pub fn reset_schema(&mut self) -> Result<()> {
        log_op_start!("schema_reset");
        let start = Instant::now();

        migrations::reset_schema(&mut self.conn).map_err(|e| {
            log_op_error!(
                "schema_reset",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "schema_reset",
            duration_ms = start.elapsed().as_millis() as u64
        );
        Ok(())
    }

    /// Run a query and materialize every matching row
    pub fn query(&self, query: &UserQuery) -> Result<Vec<User>> {
        log_op_start!("user_query", predicates = query.predicates().len());
        let start = Instant::now();

        let users = self.query_impl(query).map_err(|e| {
            log_op_error!(
                "user_query",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "user_query",
            duration_ms = start.elapsed().as_millis() as u64,
            row_count = users.len()
        );
        Ok(users)
    }

    fn query_impl(&self, query: &UserQuery) -> Result<Vec<User>> {
        let bound = select_users(query);
        let mut stmt = self.conn.prepare(&bound.sql).map_err(from_rusqlite)?;
        let users = stmt
            .query_map(params_from_iter(bound.params.iter()), user_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(users)
    }

    /// Exact username lookup
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .query(&UserQuery::by_username(username))?
            .into_iter()
            .next())
    }

    /// Insert a new user in its own transaction
    pub fn insert(&mut self, new_user: NewUser) -> Result<MutationOutcome> {
        log_op_start!("user_insert", username = %new_user.username);
        let start = Instant::now();

        let outcome = self.insert_impl(new_user).map_err(|e| {
            log_op_error!(
                "user_insert",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_outcome("user_insert", &outcome, start);
        Ok(outcome)
    }

    fn insert_impl(&mut self, new_user: NewUser) -> Result<MutationOutcome> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;

        let inserted = tx.execute(
            "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
            rusqlite::params![new_user.username, new_user.email, new_user.password_hash],
        );

        match inserted {
            Ok(_) => {
                let id = tx.last_insert_rowid();
                tx.commit().map_err(from_rusqlite)?;
                Ok(MutationOutcome::Applied(new_user.into_user(id)))
            }
            Err(err) => match unique_violation(&err) {
                Some(field) => {
                    tx.rollback().map_err(from_rusqlite)?;
                    Ok(MutationOutcome::DuplicateKey { field })
                }
                None => Err(from_rusqlite(err)),
            },
        }
    }

    /// Write back username, email, and password hash of an existing row
    pub fn update(&mut self, user: &User) -> Result<MutationOutcome> {
        log_op_start!("user_update", user_id = user.id);
        let start = Instant::now();

        let outcome = self.update_impl(user).map_err(|e| {
            log_op_error!(
                "user_update",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_outcome("user_update", &outcome, start);
        Ok(outcome)
    }

    fn update_impl(&mut self, user: &User) -> Result<MutationOutcome> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;

        let updated = tx.execute(
            "UPDATE users SET username = ?1, email = ?2, password = ?3 WHERE id = ?4",
            rusqlite::params![user.username, user.email, user.password_hash, user.id],
        );

        match updated {
            Ok(0) => Err(UserError::NotFound {
                username: user.username.clone(),
            }
            .into()),
            Ok(_) => {
                tx.commit().map_err(from_rusqlite)?;
                Ok(MutationOutcome::Applied(user.clone()))
            }
            Err(err) => match unique_violation(&err) {
                Some(field) => {
                    tx.rollback().map_err(from_rusqlite)?;
                    Ok(MutationOutcome::DuplicateKey { field })
                }
                None => Err(from_rusqlite(err)),
            },
        }
    }

    /// Physically delete a user row
    pub fn delete(&mut self, user: &User) -> Result<()> {
        log_op_start!("user_delete", user_id = user.id);
        let start = Instant::now();

        self.delete_impl(user).map_err(|e| {
            log_op_error!(
                "user_delete",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "user_delete",
            duration_ms = start.elapsed().as_millis() as u64
        );
        Ok(())
    }

    fn delete_impl(&mut self, user: &User) -> Result<()> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;

        let deleted = tx
            .execute("DELETE FROM users WHERE id = ?1", [user.id])
            .map_err(from_rusqlite)?;

        if deleted == 0 {
            return Err(UserError::NotFound {
                username: user.username.clone(),
            }
            .into());
        }

        tx.commit().map_err(from_rusqlite)?;
        Ok(())
    }
}

fn log_outcome(op: &str, outcome: &MutationOutcome, start: Instant) {
    let duration_ms = start.elapsed().as_millis() as u64;
    match outcome {
        MutationOutcome::Applied(user) => {
            log_op_end!(op, duration_ms = duration_ms, user_id = user.id);
        }
        MutationOutcome::DuplicateKey { field } => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                outcome = "duplicate_key",
                field = %field
            );
        }
    }
}

/// Maps a row selected with `USER_COLUMNS`
fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
    })
}
