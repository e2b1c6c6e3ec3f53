//! List users a page at a time
//!
//! Usage: userctl get-all-users [--limit N] [--offset N]

use super::{write_users, CommandResult};
use clap::Args;
use std::io::Write;
use userctl_core::{Page, UserQuery};
use userctl_store::Session;

#[derive(Debug, Args)]
pub struct GetAllUsersArgs {
    /// Maximum number of users to return
    #[arg(long, default_value_t = Page::DEFAULT_LIMIT)]
    pub limit: u32,

    /// Number of users to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

pub fn execute(args: GetAllUsersArgs, session: &mut Session, out: &mut dyn Write) -> CommandResult {
    let query = UserQuery::all().paged(Page::new(args.limit, args.offset));
    let users = session.query(&query)?;
    write_users(out, &users)?;
    Ok(())
}
