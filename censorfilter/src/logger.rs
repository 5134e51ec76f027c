// censorfilter/src/logger.rs
//! Logger setup for the CLI.
//!
//! All log output goes to stderr so that stdout carries only JSON.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter when neither a level nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "warn";

/// Initializes `env_logger`.
///
/// `Some(level)` forces that level for every module and ignores `RUST_LOG`.
/// `None` honours `RUST_LOG`, falling back to warnings only. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = Builder::new();
            builder.filter_level(level);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER)),
    };
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}
