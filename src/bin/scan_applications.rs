//! scan-applications - list launchable desktop applications as JSON.
//!
//! Searches `$XDG_DATA_HOME`, `$XDG_DATA_DIRS`, Flatpak and Snap export
//! directories, in that order. The first file seen for an identifier wins.

use capy_apps::{XdgEnv, search_roots};
use capy_shell_services::logging;
use capy_shell_services::output::{OutputMode, write_apps};
use clap::Parser;
use log::{error, info};
use std::io;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "scan-applications", version, about = "List installed desktop applications as JSON")]
struct Args {
    /// Emit newline-delimited JSON objects as apps are found instead of one array
    #[arg(long)]
    stream: bool,

    /// Increase log verbosity on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let roots = search_roots(&XdgEnv::from_env());
    info!("Searching {} application directories", roots.len());

    let mode = if args.stream {
        OutputMode::Stream
    } else {
        OutputMode::Array
    };

    match write_apps(&roots, mode, io::stdout().lock()) {
        Ok(count) => info!("Found {} applications", count),
        Err(e) => error!("Failed to write applications: {}", e),
    }

    ExitCode::SUCCESS
}
