//! Loading and saving vocabulary bundles.
//!
//! This module reads and writes rank files in the tiktoken text format and
//! the JSON manifests that tie a rank file to its pattern and special tokens.

pub mod format;
pub mod load;
pub mod save;

pub use format::BundleManifest;
pub use load::{load_tiktoken_bpe, parse_tiktoken_bpe, TokenizerLoader};
pub use save::TokenizerSaver;
