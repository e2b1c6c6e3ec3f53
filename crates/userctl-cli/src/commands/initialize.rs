//! Reset the database and insert the sample user
//!
//! Usage: userctl initialize

use super::CommandResult;
use clap::Args;
use std::io::Write;
use userctl_core::errors::{ExError, ExErrorKind};
use userctl_core::model::NewUser;
use userctl_core_types::Sensitive;
use userctl_store::{MutationOutcome, Session};

pub const SEED_USERNAME: &str = "bob";
pub const SEED_EMAIL: &str = "bob@mail.com";
pub const SEED_PASSWORD: &str = "bobpass";

#[derive(Debug, Args)]
pub struct InitializeArgs {}

/// Drop and recreate every table, then insert `bob`
pub fn execute(_args: InitializeArgs, session: &mut Session, out: &mut dyn Write) -> CommandResult {
    session.reset_schema()?;

    let bob = NewUser::new(SEED_USERNAME, SEED_EMAIL, &Sensitive::from(SEED_PASSWORD))?;
    match session.insert(bob)? {
        MutationOutcome::Applied(user) => {
            tracing::info!(user_id = user.id, "seed user created");
        }
        MutationOutcome::DuplicateKey { field } => {
            return Err(ExError::new(
                ExErrorKind::Internal,
                format!("seed user collided on {} after reset", field),
            )
            .in_op("initialize")
            .into());
        }
    }

    writeln!(out, "Database Initialized")?;
    Ok(())
}
