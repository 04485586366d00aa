//! ranktok - tiktoken-compatible BPE tokenizer
//!
//! This crate combines the merge engine from `ranktok-core` with
//! pre-tokenization, special token policy and vocabulary bundle loading into
//! a single tokenizer type whose output matches the reference encodings
//! token for token.
//!
//! # Features
//!
//! - Exact byte-level BPE over rank tables (rank = token ID)
//! - Pre-tokenization with the published r50k, cl100k and o200k patterns
//! - Allowed/disallowed special token policy with leftmost-longest matching
//! - Strict, replacing and ignoring UTF-8 decode modes
//! - Loading and saving the tiktoken text format plus JSON manifests
//! - Parallel batch encoding and decoding
//!
//! # Example
//!
//! ```rust
//! use ranktok::{byte_ranks, DecodeMode, SpecialSet, Tokenizer, ENDOFTEXT};
//!
//! let mut ranks = byte_ranks();
//! ranks.insert(b"He".to_vec(), 256);
//! ranks.insert(b"llo".to_vec(), 257);
//! ranks.insert(b"ll".to_vec(), 258);
//!
//! let tokenizer = Tokenizer::builder()
//!     .name("demo")
//!     .ranks(ranks)
//!     .special_token(ENDOFTEXT, 1000)
//!     .build()?;
//!
//! let tokens = tokenizer.encode("Hello<|endoftext|>", &SpecialSet::All, &SpecialSet::All)?;
//! assert_eq!(tokens, vec![256, 257, 1000]);
//!
//! let text = tokenizer.decode(&tokens, DecodeMode::Strict)?;
//! assert_eq!(text, "Hello<|endoftext|>");
//! # Ok::<(), ranktok::TokenizerError>(())
//! ```

// Re-export core types
pub use ranktok_core::{
    byte_pair_encode, byte_pair_split, byte_ranks, Rank, RankTable, Result, SpecialTokenTable,
    SpecialTokens, TokenizerError,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{
    DecodeMode, SingleToken, SpecialSet, Tokenizer, TokenizerBuilder, TokenizerConfig,
};

// IO/Serialization
pub mod io;
pub use io::{load_tiktoken_bpe, parse_tiktoken_bpe, BundleManifest, TokenizerLoader, TokenizerSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::patterns::{
    CL100K_PATTERN, ENDOFPROMPT, ENDOFTEXT, FIM_MIDDLE, FIM_PREFIX, FIM_SUFFIX, O200K_PATTERN,
    R50K_PATTERN,
};
pub use pre_tokenizer::Splitter;

// Utilities
pub mod utils;
pub use utils::{CacheStats, TokenizerCache};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
