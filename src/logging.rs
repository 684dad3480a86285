//! Logger setup shared by the binaries.

use env_logger::Env;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialise `env_logger` on stderr. `RUST_LOG` wins over `-v`.
pub fn init(verbose: u8) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .format_timestamp(None)
        .init();
}
