//! CLI commands for the ranktok tokenizer.

pub mod benchmark;
pub mod count;
pub mod decode;
pub mod encode;
pub mod export;

pub use benchmark::BenchmarkCommand;
pub use count::CountCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use export::ExportCommand;

use anyhow::{Context, Result};
use ranktok::{Tokenizer, TokenizerLoader};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load the tokenizer described by a bundle manifest.
pub(crate) fn load_tokenizer(manifest: &Path) -> Result<Tokenizer> {
    let tokenizer = TokenizerLoader::load_manifest(manifest)
        .with_context(|| format!("Failed to load bundle {}", manifest.display()))?;
    debug!(name = tokenizer.name(), n_vocab = tokenizer.n_vocab(), "tokenizer ready");
    Ok(tokenizer)
}

/// Input text from the argument, or from stdin when it is "-".
pub(crate) fn read_input(input: String) -> Result<String> {
    if input != "-" {
        return Ok(input);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}
