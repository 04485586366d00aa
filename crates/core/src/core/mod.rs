//! Core BPE algorithm implementation.
//!
//! This module contains the rank and special token tables and the pair merge
//! engine, independent of pre-tokenization.

pub mod merges;
pub mod ranks;
pub mod special;

pub use merges::{byte_pair_encode, byte_pair_encode_into, byte_pair_split};
pub use ranks::{
    build_decoder, byte_ranks, max_rank, missing_single_bytes, validate_byte_coverage, Rank,
    RankDecoder, RankTable, UNRANKED,
};
pub use special::{SpecialTokenTable, SpecialTokens};
