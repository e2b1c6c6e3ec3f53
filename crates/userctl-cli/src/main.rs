//! userctl CLI
//!
//! Administrative command-line tool for the user store. Each invocation
//! opens one session, runs one command, prints its outcome, and exits.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Write;
use userctl_core::errors::ExError;
use userctl_core::logging_facility;
use userctl_core_types::RequestId;
use userctl_store::Session;

mod commands;
mod config;

use config::{Config, GlobalArgs};

#[derive(Debug, Parser)]
#[command(name = "userctl")]
#[command(about = "userctl - Manage user records", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Drop and recreate all tables, then insert the sample user `bob`
    Initialize(commands::initialize::InitializeArgs),
    /// Find users whose username or email contains QUERY
    GetUser(commands::get_user::GetUserArgs),
    /// List users with pagination
    GetAllUsers(commands::get_all_users::GetAllUsersArgs),
    /// Change the email address of a user
    ChangeEmail(commands::change_email::ChangeEmailArgs),
    /// Create a new user
    CreateUser(commands::create_user::CreateUserArgs),
    /// Delete a user (irreversible)
    DeleteUser(commands::delete_user::DeleteUserArgs),
}

fn main() {
    // Before parsing, so clap's env fallbacks see values from .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_args(&cli.global);
    logging_facility::init(config.log_profile());

    let request_id = RequestId::new();
    let span = tracing::info_span!("userctl", request_id = %request_id);
    let _guard = span.enter();

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", with_request_id(e, request_id));
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> commands::CommandResult {
    config.ensure_database_dir()?;
    let mut session = open_session(&command, config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Initialize(args) => commands::initialize::execute(args, &mut session, &mut out),
        Commands::GetUser(args) => commands::get_user::execute(args, &mut session, &mut out),
        Commands::GetAllUsers(args) => {
            commands::get_all_users::execute(args, &mut session, &mut out)
        }
        Commands::ChangeEmail(args) => {
            commands::change_email::execute(args, &mut session, &mut out)
        }
        Commands::CreateUser(args) => commands::create_user::execute(args, &mut session, &mut out),
        Commands::DeleteUser(args) => commands::delete_user::execute(args, &mut session, &mut out),
    }?;

    out.flush()?;
    Ok(())
}

/// `initialize` replaces whatever schema is on disk, so it must not
/// migrate first
fn open_session(command: &Commands, config: &Config) -> userctl_core::Result<Session> {
    match command {
        Commands::Initialize(_) => {
            Session::open_for_reset(&config.database_path, config.session_options())
        }
        _ => Session::open(&config.database_path, config.session_options()),
    }
}

fn with_request_id(err: Box<dyn Error>, request_id: RequestId) -> Box<dyn Error> {
    match err.downcast::<ExError>() {
        Ok(ex_err) => Box::new((*ex_err).with_request_id(request_id)),
        Err(other) => other,
    }
}
