// censorfilter/src/cli.rs
//! This file defines the command-line interface (CLI) for the censorfilter application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "censorfilter",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve and test chat messages against banned-word lists",
    long_about = "censorfilter normalizes chat messages (undoing leetspeak, stretched letters, split letters, links and emails) and tests them against per-language banned-word lists, caller patterns, banned phrases and banned literal words. Results are printed as JSON.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Catalog configuration file (YAML).
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        env = "CENSORFILTER_CONFIG",
        help = "Catalog configuration file (YAML). Defaults to <config dir>/censorfilter/config.yaml when present."
    )]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true, help = "Pretty-print JSON output (the default when stdout is a terminal).")]
    pub pretty: bool,

    /// Disable informational messages
    #[arg(long, short = 'q', global = true, conflicts_with = "debug", help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `censorfilter` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the normalized text and its spots.
    #[command(about = "Normalize and tokenize a message, printing the resolved text as JSON.")]
    Resolve(ResolveCommand),

    /// Tests a message and prints the verdict.
    #[command(about = "Test a message for banned content, printing the result as JSON.")]
    Test(TestCommand),
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,
}

/// Arguments for the `test` command.
#[derive(Parser, Debug)]
pub struct TestCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Request settings as JSON; flag values are added to them.
    #[arg(long = "settings", value_name = "FILE", help = "Load request settings from a JSON file. Flags below add to it.")]
    pub settings: Option<PathBuf>,

    /// Base languages (comma-separated).
    #[arg(
        long = "languages",
        short = 'l',
        value_delimiter = ',',
        help = "Base languages to test against (comma-separated). Without this flag or --settings, every loaded language is used."
    )]
    pub languages: Vec<String>,

    /// Extra banned patterns.
    #[arg(long = "pattern", value_name = "REGEX", help = "Add a banned pattern for this request. Repeatable.")]
    pub patterns: Vec<String>,

    /// Banned phrases.
    #[arg(long = "phrase", value_name = "TEXT", help = "Add a banned phrase (case-sensitive substring). Repeatable.")]
    pub phrases: Vec<String>,

    /// Banned literal words.
    #[arg(long = "word", value_name = "WORD", help = "Add a banned literal word (case-insensitive, whole word). Repeatable.")]
    pub words: Vec<String>,

    /// Uncensor overrides.
    #[arg(long = "uncensor", value_name = "REGEX", help = "Add a pattern that vetoes pattern hits. Repeatable.")]
    pub uncensor: Vec<String>,

    /// Exit with code 1 when the message is censored.
    #[arg(long = "fail-on-censor", help = "Exit with a non-zero code if the message is censored.")]
    pub fail_on_censor: bool,
}
