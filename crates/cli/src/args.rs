//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read connection settings from flags or environment variables.
//!
//! Non-responsibilities:
//! - Does not run sessions (see `session` module).
//! - Does not validate configuration (see `tutorial_config::ConfigLoader`).

use clap::{Parser, Subcommand, ValueEnum};
use tutorial_config::constants::DEFAULT_DEV_BASE_URL;

#[derive(Parser)]
#[command(name = "tutorial-cli")]
#[command(about = "Simulate tutorial first visits against an exploration backend", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  tutorial-cli editor --experience-id exp1\n  tutorial-cli editor --experience-id exp1 --returning\n  tutorial-cli translation --experience-id exp1\n  tutorial-cli --log-format json --base-url http://localhost:8181 translation -e exp1 --seen-before\n"
)]
pub struct Cli {
    /// Base URL of the backend (e.g., http://localhost:8181)
    #[arg(short, long, global = true, env = "TUTORIAL_BASE_URL", default_value = DEFAULT_DEV_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "TUTORIAL_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "TUTORIAL_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the editor and walk through its tutorial
    Editor {
        /// Exploration to open
        #[arg(short, long)]
        experience_id: String,

        /// Treat the user as having visited the editor before
        #[arg(long)]
        returning: bool,
    },

    /// Open the translation tab and walk through its tutorial
    Translation {
        /// Exploration to open
        #[arg(short, long)]
        experience_id: String,

        /// Treat the translation tutorial as already seen
        #[arg(long)]
        seen_before: bool,
    },
}
