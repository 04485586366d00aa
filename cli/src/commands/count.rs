//! Count command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Count command arguments.
#[derive(Parser)]
pub struct CountCommand {
    /// Path to the bundle manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Text to count ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,
}

use super::{load_tokenizer, read_input};
use anyhow::Result as AnyhowResult;

pub fn run(cmd: CountCommand) -> AnyhowResult<()> {
    let tokenizer = load_tokenizer(&cmd.manifest)?;
    let input_text = read_input(cmd.input)?;

    println!("{}", tokenizer.count_tokens(&input_text)?);

    Ok(())
}
