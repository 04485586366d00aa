//! Save functionality for vocabulary bundles.
//!
//! Rank tables are written in the same tiktoken text format the loader
//! reads, one entry per line in ascending rank order.

use super::format::BundleManifest;
use crate::tokenizer::Tokenizer;
use base64::{engine::general_purpose::STANDARD, Engine};
use ranktok_core::{RankTable, Result, TokenizerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tokenizer saver - writes rank files and manifests.
pub struct TokenizerSaver;

impl TokenizerSaver {
    /// Write a rank table to any writer, sorted by rank.
    pub fn write_tiktoken_bpe<W: Write>(ranks: &RankTable, mut writer: W) -> Result<()> {
        let mut entries: Vec<_> = ranks.iter().collect();
        entries.sort_unstable_by_key(|&(_, &rank)| rank);

        for (bytes, rank) in entries {
            writeln!(writer, "{} {}", STANDARD.encode(bytes), rank)
                .map_err(|e| TokenizerError::Save(format!("Failed to write rank entry: {}", e)))?;
        }

        writer
            .flush()
            .map_err(|e| TokenizerError::Save(format!("Failed to flush rank file: {}", e)))
    }

    /// Write a rank table to a file.
    pub fn save_tiktoken_bpe(ranks: &RankTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TokenizerError::io(path, e))?;
        Self::write_tiktoken_bpe(ranks, BufWriter::new(file))?;
        debug!(path = %path.display(), entries = ranks.len(), "saved rank file");
        Ok(())
    }

    /// Write a manifest as pretty JSON.
    pub fn save_manifest(manifest: &BundleManifest, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TokenizerError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), manifest)?;
        Ok(())
    }

    /// Save a tokenizer as a bundle directory.
    ///
    /// Writes `<name>.tiktoken` and `<name>.json` into `dir`, creating it if
    /// needed, and returns the manifest path.
    pub fn save_bundle(tokenizer: &Tokenizer, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| TokenizerError::io(dir, e))?;

        let name = if tokenizer.name().is_empty() {
            "tokenizer"
        } else {
            tokenizer.name()
        };
        let vocab_file = PathBuf::from(format!("{}.tiktoken", name));
        Self::save_tiktoken_bpe(tokenizer.ranks(), dir.join(&vocab_file))?;

        let manifest = BundleManifest {
            name: tokenizer.name().to_string(),
            pattern: tokenizer.pattern().to_string(),
            vocab_file,
            special_tokens: tokenizer
                .special_tokens()
                .iter()
                .map(|(literal, id)| (literal.to_string(), id))
                .collect(),
        };

        let manifest_path = dir.join(format!("{}.json", name));
        Self::save_manifest(&manifest, &manifest_path)?;
        Ok(manifest_path)
    }
}
