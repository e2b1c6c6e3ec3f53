//! userctl core: model, queries, password hashing, and the error and
//! logging facilities shared by the store and the CLI.
//!
//! - `User` / `NewUser` data model
//! - `UserQuery` predicate model (exact / contains, OR-composed, paged)
//! - Argon2id password hashing
//! - `ExError` structured errors and `UserError` domain errors
//! - `logging_facility`: subscriber init, operation macros, test capture

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod password;
pub mod queries;

#[doc(hidden)]
pub use userctl_core_types;

pub use errors::{ExError, ExErrorKind, Result, UserError};
pub use model::{NewUser, User};
pub use queries::{Field, Page, Predicate, UserQuery};
