//! CLI argument definitions using clap
//!
//! Commands:
//! - answerdb check --config <path>
//! - answerdb start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// answerdb - reputation-weighted Q&A answer store
#[derive(Parser, Debug)]
#[command(name = "answerdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a configuration file and exit
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./answerdb.json")]
        config: PathBuf,
    },

    /// Load seed data and serve JSON-line requests from stdin
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./answerdb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
