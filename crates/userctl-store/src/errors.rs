//! Store-specific error helpers
//!
//! Everything leaving this crate is an `ExError`; uniqueness violations
//! are detected here so callers can turn them into outcomes.

use rusqlite::ErrorCode;
use userctl_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// A migration's SQL failed; the SQLite error is kept as the cause
pub fn migration_error(migration_id: &str, err: rusqlite::Error) -> ExError {
    ExError::new(
        ExErrorKind::Persistence,
        format!("Migration {} failed", migration_id),
    )
    .in_op("migration")
    .caused_by(from_rusqlite(err))
}

/// The ledger records a different checksum than the embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(
        ExErrorKind::Persistence,
        format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    )
    .in_op("migration_checksum")
}

pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence, err.to_string()).in_op("sqlite")
}

/// If `err` is a UNIQUE constraint violation, return the violated column
///
/// SQLite reports these as `UNIQUE constraint failed: users.email`; the
/// column is `"unknown"` when the message has another shape.
pub fn unique_violation(err: &rusqlite::Error) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            let column = message
                .as_deref()
                .and_then(|m| m.rsplit_once('.'))
                .map(|(_, column)| column.trim().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Some(column)
        }
        _ => None,
    }
}
