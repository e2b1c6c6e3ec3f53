//! One module per subcommand
//!
//! Each `execute` takes the open session and an output sink, runs exactly
//! one gateway operation, and writes the outcome. Not-found and duplicate
//! outcomes are written as messages and return `Ok`.

pub mod change_email;
pub mod create_user;
pub mod delete_user;
pub mod get_all_users;
pub mod get_user;
pub mod initialize;

use std::io::Write;
use userctl_core::User;

/// Shown when a write collides with an existing username or email
pub const DUPLICATE_MESSAGE: &str = "Username or email already taken!";

pub const NO_USERS_MESSAGE: &str = "No users found";

/// Command result type, as returned to `main`
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Write one line per user, or the empty-result message
fn write_users(out: &mut dyn Write, users: &[User]) -> std::io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "{}", NO_USERS_MESSAGE);
    }
    for user in users {
        writeln!(out, "{}", user)?;
    }
    Ok(())
}
