//! CLI module for answerdb
//!
//! - check: validate a configuration file
//! - start: boot in-memory stores and serve JSON-line requests

mod args;
mod commands;
mod errors;
mod io;
mod seed;

pub use args::{Cli, Command};
pub use commands::{boot, check, handle, run_command, serve, start, Request, ServeSummary};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response};
pub use seed::{Seed, SeedScore};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
