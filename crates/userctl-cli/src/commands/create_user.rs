//! Create a user
//!
//! Usage: userctl create-user <USERNAME> <EMAIL> <PASSWORD>

use super::{CommandResult, DUPLICATE_MESSAGE};
use clap::Args;
use std::io::Write;
use userctl_core::model::NewUser;
use userctl_core_types::Sensitive;
use userctl_store::{MutationOutcome, Session};

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    /// Desired username
    pub username: String,

    /// Email address
    pub email: String,

    /// Plain-text password; only its Argon2 hash is stored
    pub password: Sensitive<String>,
}

pub fn execute(args: CreateUserArgs, session: &mut Session, out: &mut dyn Write) -> CommandResult {
    let new_user = NewUser::new(&args.username, &args.email, &args.password)?;

    match session.insert(new_user)? {
        MutationOutcome::Applied(user) => writeln!(out, "{}", user)?,
        MutationOutcome::DuplicateKey { .. } => writeln!(out, "{}", DUPLICATE_MESSAGE)?,
    }
    Ok(())
}
