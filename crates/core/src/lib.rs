//! ranktok-core - Core byte pair encoding engine
//!
//! This crate provides the rank tables and the merge algorithm used by the
//! `ranktok` tokenizer, independent of pre-tokenization and special-token
//! policy.
//!
//! # Features
//!
//! - Rank tables keyed by raw bytes using `AHashMap`
//! - Exact tiktoken-compatible merge loop with leftmost tie-breaking
//! - Bounded merge iterations with diagnostic errors
//! - Shared, immutable tables behind `Arc`
//!
//! # Example
//!
//! ```rust
//! use ranktok_core::{byte_pair_encode, byte_ranks};
//!
//! let mut ranks = byte_ranks();
//! ranks.insert(b"ab".to_vec(), 256);
//!
//! let tokens = byte_pair_encode(b"abc", &ranks)?;
//! assert_eq!(tokens, vec![256, b'c' as u32]);
//! # Ok::<(), ranktok_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use core::{
    build_decoder, byte_pair_encode, byte_pair_encode_into, byte_pair_split, byte_ranks,
    max_rank, missing_single_bytes, validate_byte_coverage, Rank, RankDecoder, RankTable,
    SpecialTokenTable, SpecialTokens, UNRANKED,
};

// Encoding modes
pub mod encoding;
pub use encoding::ByteLevelEncoder;
