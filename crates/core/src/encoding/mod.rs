//! Encoding modes for BPE tokenization.
//!
//! Only byte-level encoding is provided: every input is a UTF-8 byte string
//! and every vocabulary entry is a byte sequence.

pub mod byte_level;

pub use byte_level::ByteLevelEncoder;
