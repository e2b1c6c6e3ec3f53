//! Search users by partial username or email
//!
//! Usage: userctl get-user <QUERY>

use super::{write_users, CommandResult};
use clap::Args;
use std::io::Write;
use userctl_core::UserQuery;
use userctl_store::Session;

#[derive(Debug, Args)]
pub struct GetUserArgs {
    /// Partial username or email to search for
    pub query: String,
}

pub fn execute(args: GetUserArgs, session: &mut Session, out: &mut dyn Write) -> CommandResult {
    let users = session.query(&UserQuery::search(&args.query))?;
    write_users(out, &users)?;
    Ok(())
}
