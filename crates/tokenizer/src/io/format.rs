//! Format definitions for vocabulary bundles.
//!
//! A bundle is a small JSON manifest naming the pre-tokenization pattern,
//! the special tokens, and a rank file in the tiktoken text format:
//!
//! ```text
//! SGVsbG8= 0
//! V29ybGQ= 1
//! ```
//!
//! Each line of the rank file is base64 token bytes, one space, then the
//! decimal rank.

use ranktok_core::Rank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON manifest describing a vocabulary bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Encoding name
    pub name: String,
    /// Pre-tokenization pattern
    pub pattern: String,
    /// Rank file, relative paths resolve against the manifest directory
    pub vocab_file: PathBuf,
    /// Special token literal -> ID
    #[serde(default)]
    pub special_tokens: BTreeMap<String, Rank>,
}

impl BundleManifest {
    /// Rank file path for a manifest located in `manifest_dir`.
    pub fn resolve_vocab_file(&self, manifest_dir: &Path) -> PathBuf {
        if self.vocab_file.is_absolute() {
            self.vocab_file.clone()
        } else {
            manifest_dir.join(&self.vocab_file)
        }
    }
}
