//! get-user-info - print the invoking user's account details as JSON.

use capy_shell_services::logging;
use capy_shell_services::output::write_json_line;
use capy_user::UserReport;
use clap::Parser;
use log::{error, warn};
use std::io;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "get-user-info", version, about = "Print the current user's account details as JSON")]
struct Args {
    /// Increase log verbosity on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let report = UserReport::current();
    if let UserReport::Error { error } = &report {
        warn!("User lookup failed: {}", error);
    }

    if let Err(e) = write_json_line(&mut io::stdout().lock(), &report) {
        error!("Failed to write user info: {}", e);
    }

    ExitCode::SUCCESS
}
