//! Encode command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Path to the bundle manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Emit special tokens found in the text instead of rejecting them
    #[arg(short, long, default_value_t = false)]
    pub allow_special: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

use super::{load_tokenizer, read_input};
use anyhow::Result as AnyhowResult;
use ranktok::SpecialSet;

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer = load_tokenizer(&cmd.manifest)?;
    let input_text = read_input(cmd.input)?;

    let allowed = if cmd.allow_special {
        SpecialSet::All
    } else {
        SpecialSet::None
    };
    let ids = tokenizer.encode_with_allowed(&input_text, &allowed)?;

    let output = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            println!("Encoded {} tokens to {}", ids.len(), path.display());
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
