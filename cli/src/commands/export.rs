//! Export command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Export command arguments.
#[derive(Parser)]
pub struct ExportCommand {
    /// Path to the bundle manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Directory to write the bundle into
    #[arg(short, long)]
    pub output: PathBuf,
}

use anyhow::Result as AnyhowResult;
use ranktok::TokenizerSaver;

pub fn run(cmd: ExportCommand) -> AnyhowResult<()> {
    let tokenizer = super::load_tokenizer(&cmd.manifest)?;
    let manifest_path = TokenizerSaver::save_bundle(&tokenizer, &cmd.output)?;

    println!(
        "Wrote {} tokens to {}",
        tokenizer.ranks().len(),
        manifest_path.display()
    );

    Ok(())
}
