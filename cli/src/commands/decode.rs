//! Decode command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Path to the bundle manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Token IDs to decode (separated by spaces or commas)
    #[arg(long)]
    pub ids: String,

    /// Handling of invalid UTF-8: strict, replace or ignore
    #[arg(long, default_value_t = DecodeMode::Replace)]
    pub mode: DecodeMode,
}

use anyhow::{Context, Result as AnyhowResult};
use ranktok::DecodeMode;

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = super::load_tokenizer(&cmd.manifest)?;

    let ids: Vec<u32> = cmd
        .ids
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("Invalid token ID '{}'", s))
        })
        .collect::<AnyhowResult<_>>()?;

    let text = tokenizer.decode(&ids, cmd.mode)?;
    println!("{}", text);

    Ok(())
}
