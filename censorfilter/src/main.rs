// censorfilter/src/main.rs
//! censorfilter entry point.
//!
//! Loads the catalog once, then runs the requested command against it.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

use censorfilter::cli::{Cli, Commands};
use censorfilter::commands::{resolve::run_resolve, test::run_test};
use censorfilter::logger;
use censorfilter_core::{Filter, FilterConfig};

/// `<config dir>/censorfilter/config.yaml`, if it exists.
fn default_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("censorfilter").join("config.yaml");
    path.is_file().then_some(path)
}

fn load_filter(cli: &Cli) -> Result<Filter> {
    let config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => FilterConfig::load_from_file(&path)?,
        None => {
            debug!("No configuration file found; using the embedded catalog.");
            FilterConfig::default()
        }
    };
    Filter::from_config(&config).context("Failed to load the filter catalog")
}

fn run(cli: Cli) -> Result<ExitCode> {
    let filter = load_filter(&cli)?;

    match &cli.command {
        Commands::Resolve(cmd) => {
            run_resolve(&filter, cmd, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Test(cmd) => {
            let result = run_test(&filter, cmd, cli.pretty)?;
            if cmd.fail_on_censor && result.censored {
                info!("Message censored; exiting with code 1.");
                return Ok(ExitCode::from(1));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
