//! Error types for the ranktok libraries.

use crate::core::ranks::Rank;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error during tokenization
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// The rank table lacks one or more of the 256 single-byte entries
    #[error(
        "Incomplete vocabulary: {} single-byte token(s) missing, first missing byte {:#04x}",
        .missing.len(),
        .missing.first().copied().unwrap_or_default()
    )]
    IncompleteVocabulary { missing: Vec<u8> },

    /// A byte sequence produced during encoding has no rank
    #[error("Vocabulary gap: no rank for {} byte(s) {:?}", .bytes.len(), String::from_utf8_lossy(.bytes))]
    VocabularyGap { bytes: Vec<u8> },

    /// Pre-tokenization pattern failed to compile
    #[error("Invalid pre-tokenization pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// Two byte sequences share a rank, so decoding would be ambiguous
    #[error("Duplicate rank {rank} for {:?} and {:?}", String::from_utf8_lossy(.first), String::from_utf8_lossy(.second))]
    DuplicateRank {
        rank: Rank,
        first: Vec<u8>,
        second: Vec<u8>,
    },

    /// A special token id is also used by an ordinary token
    #[error("Special token {token:?} reuses id {id} of an ordinary token")]
    SpecialTokenCollision { token: String, id: Rank },

    /// Input text contains a special token the caller did not allow
    #[error("Disallowed special token {token:?} found at byte offset {position}")]
    DisallowedSpecialToken { token: String, position: usize },

    /// No exact vocabulary entry for a single-token lookup
    #[error("Unknown token: {:?}", String::from_utf8_lossy(.0))]
    UnknownToken(Vec<u8>),

    /// Token ID present in neither decoder
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(Rank),

    /// Strict decoding hit malformed UTF-8
    #[error("Invalid UTF-8 in decoded bytes after {valid_up_to} valid byte(s)")]
    InvalidUtf8 {
        valid_up_to: usize,
        #[source]
        err: std::str::Utf8Error,
    },

    /// The merge loop ran past its iteration bound
    #[error(
        "Merge loop exceeded {iterations} iterations on a {piece_len}-byte piece (boundaries: {boundaries:?})"
    )]
    MergeLimitExceeded {
        piece_len: usize,
        iterations: usize,
        boundaries: Vec<usize>,
    },

    /// Error loading a vocabulary bundle
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a rank table
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
