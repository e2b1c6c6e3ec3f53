//! Delete a user. Irreversible.
//!
//! Usage: userctl delete-user <USERNAME>

use super::CommandResult;
use clap::Args;
use std::io::Write;
use userctl_core::errors::ExErrorKind;
use userctl_store::Session;

#[derive(Debug, Args)]
pub struct DeleteUserArgs {
    /// Username of the user to delete
    pub username: String,
}

pub fn execute(args: DeleteUserArgs, session: &mut Session, out: &mut dyn Write) -> CommandResult {
    let Some(user) = session.find_by_username(&args.username)? else {
        writeln!(out, "{}", not_found(&args.username))?;
        return Ok(());
    };

    match session.delete(&user) {
        Ok(()) => writeln!(out, "{} deleted", user.username)?,
        Err(e) if e.kind() == ExErrorKind::NotFound => {
            writeln!(out, "{}", not_found(&args.username))?
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn not_found(username: &str) -> String {
    format!("{} not found! Unable to delete user.", username)
}
