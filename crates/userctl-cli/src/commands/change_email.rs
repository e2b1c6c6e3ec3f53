//! Change a user's email
//!
//! Usage: userctl change-email <USERNAME> <NEW_EMAIL>

use super::{CommandResult, DUPLICATE_MESSAGE};
use clap::Args;
use std::io::Write;
use userctl_core::errors::ExErrorKind;
use userctl_store::{MutationOutcome, Session};

#[derive(Debug, Args)]
pub struct ChangeEmailArgs {
    /// Username of the user to update
    pub username: String,

    /// New email address
    pub new_email: String,
}

pub fn execute(args: ChangeEmailArgs, session: &mut Session, out: &mut dyn Write) -> CommandResult {
    let Some(mut user) = session.find_by_username(&args.username)? else {
        writeln!(out, "{}", not_found(&args.username))?;
        return Ok(());
    };

    user.set_email(&args.new_email)?;

    match session.update(&user) {
        Ok(MutationOutcome::Applied(user)) => {
            writeln!(out, "Updated {}'s email to {}", user.username, user.email)?
        }
        Ok(MutationOutcome::DuplicateKey { .. }) => writeln!(out, "{}", DUPLICATE_MESSAGE)?,
        // Deleted by another process between lookup and update
        Err(e) if e.kind() == ExErrorKind::NotFound => {
            writeln!(out, "{}", not_found(&args.username))?
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn not_found(username: &str) -> String {
    format!("{} not found! Unable to update email.", username)
}
