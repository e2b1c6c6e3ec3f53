//! Migration framework
//!
//! Provides:
//! - Idempotent, checksummed application of embedded SQL migrations
//! - Destructive reset (drop every table, re-apply from scratch)

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_migrations, reset_schema};
