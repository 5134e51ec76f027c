// censorfilter/src/commands/resolve.rs
//! `resolve` command: prints the normalized text and spots of a message.

use anyhow::Result;
use log::info;

use censorfilter_core::ModerationEngine;

use crate::cli::ResolveCommand;
use crate::commands::{read_input, write_json};

pub fn run_resolve(engine: &dyn ModerationEngine, cmd: &ResolveCommand, pretty: bool) -> Result<()> {
    let input = read_input(cmd.input_file.as_deref())?;
    let resolved = engine.resolve(&input);
    info!(
        "Resolved input into {} spot(s).",
        resolved.spots.len()
    );
    write_json(&resolved, pretty)
}
