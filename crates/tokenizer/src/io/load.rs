//! Load functionality for vocabulary bundles.
//!
//! This module reads rank files in the tiktoken text format and JSON bundle
//! manifests from local disk. Nothing is fetched or verified against hashes.

use super::format::BundleManifest;
use crate::tokenizer::Tokenizer;
use base64::{engine::general_purpose::STANDARD, Engine};
use ranktok_core::{Rank, RankTable, Result, SpecialTokenTable, TokenizerError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Parse a rank table in the tiktoken text format.
///
/// Blank lines are skipped and a trailing `\r` is tolerated. Errors name the
/// 1-based line number.
pub fn parse_tiktoken_bpe(data: &[u8]) -> Result<RankTable> {
    let mut ranks = RankTable::new();

    for (index, line) in data.split(|&b| b == b'\n').enumerate() {
        let line_num = index + 1;
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        let space_pos = line.iter().rposition(|&b| b == b' ').ok_or_else(|| {
            TokenizerError::Load(format!("Line {}: missing space separator", line_num))
        })?;

        let token = STANDARD.decode(&line[..space_pos]).map_err(|e| {
            TokenizerError::Load(format!("Line {}: invalid base64: {}", line_num, e))
        })?;

        let rank_str = std::str::from_utf8(&line[space_pos + 1..]).map_err(|_| {
            TokenizerError::Load(format!("Line {}: invalid UTF-8 in rank", line_num))
        })?;
        let rank: Rank = rank_str.trim().parse().map_err(|_| {
            TokenizerError::Load(format!("Line {}: invalid rank '{}'", line_num, rank_str))
        })?;

        if ranks.insert(token, rank).is_some() {
            return Err(TokenizerError::Load(format!(
                "Line {}: duplicate token for rank {}",
                line_num, rank
            )));
        }
    }

    Ok(ranks)
}

/// Read and parse a rank file.
pub fn load_tiktoken_bpe(path: impl AsRef<Path>) -> Result<RankTable> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| TokenizerError::io(path, e))?;
    let ranks = parse_tiktoken_bpe(&data)?;
    debug!(path = %path.display(), entries = ranks.len(), "loaded rank file");
    Ok(ranks)
}

/// Tokenizer loader - builds tokenizers from bundles on disk.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Read a bundle manifest.
    pub fn read_manifest(path: impl AsRef<Path>) -> Result<BundleManifest> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TokenizerError::io(path, e))?;
        let manifest = serde_json::from_reader(BufReader::new(file))?;
        Ok(manifest)
    }

    /// Build a tokenizer from a manifest and its rank file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON manifest
    pub fn load_manifest(path: impl AsRef<Path>) -> Result<Tokenizer> {
        let path = path.as_ref();
        let manifest = Self::read_manifest(path)?;
        let manifest_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::load_bundle(&manifest, manifest_dir)
    }

    /// Build a tokenizer from an already parsed manifest.
    ///
    /// # Arguments
    /// * `manifest` - Bundle description
    /// * `manifest_dir` - Directory that relative rank file paths resolve against
    pub fn load_bundle(manifest: &BundleManifest, manifest_dir: &Path) -> Result<Tokenizer> {
        let ranks = load_tiktoken_bpe(manifest.resolve_vocab_file(manifest_dir))?;
        let special_tokens: SpecialTokenTable = manifest
            .special_tokens
            .iter()
            .map(|(literal, &id)| (literal.clone(), id))
            .collect();

        Tokenizer::new(&manifest.name, &manifest.pattern, ranks, special_tokens)
    }
}
