//! Pre-tokenization pipeline.
//!
//! Text is split into pieces by a compiled pattern before BPE encoding.

pub mod patterns;
pub mod split;

pub use patterns::{CL100K_PATTERN, O200K_PATTERN, R50K_PATTERN};
pub use split::Splitter;
