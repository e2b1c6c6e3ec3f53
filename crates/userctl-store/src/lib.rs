//! userctl store: the session gateway over SQLite
//!
//! Provides:
//! - Connection open/configure (`db`)
//! - Embedded, checksummed schema migrations and destructive schema reset
//! - `Session`: one connection per command, transactional single-row mutations
//! - Translation of `UserQuery` predicates into parameterized SQL

pub mod db;
pub mod errors;
pub mod migrations;
pub mod session;
mod sql;

pub use errors::Result;
pub use session::{MutationOutcome, Session, SessionOptions};
