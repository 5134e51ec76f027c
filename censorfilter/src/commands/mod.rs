// censorfilter/src/commands/mod.rs
//! Command implementations and the I/O helpers they share.

pub mod resolve;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads the message from `path`, or from stdin when no path is given.
///
/// One trailing line break is removed; a message is a single chat line.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let mut input = match path {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        None => {
            if io::stdin().is_terminal() {
                info!("Reading input from stdin. Press Ctrl-D to finish.");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    debug!("Read {} byte(s) of input.", input.len());
    Ok(input)
}

/// Writes `value` as one JSON document to stdout.
pub fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let pretty = pretty || stdout.is_terminal();
    let mut writer = stdout.lock();
    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    };
    written.context("Failed to serialize output")?;
    writeln!(writer)?;
    Ok(())
}
