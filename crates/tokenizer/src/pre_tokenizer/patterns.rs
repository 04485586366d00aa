//! Published pre-tokenization patterns and special token literals.
//!
//! These are the split rules of the public OpenAI encodings. A pattern only
//! decides piece boundaries; the vocabulary still has to come from a loader.

/// GPT-2 / r50k_base / p50k_base split rule.
pub const R50K_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// cl100k_base (GPT-4, GPT-3.5-turbo) split rule.
pub const CL100K_PATTERN: &str = r"(?i:'s|'t|'re|'ve|'m|'ll|'d)|[^\r\n\p{L}\p{N}]?\p{L}+|\p{N}{1,3}| ?[^\s\p{L}\p{N}]+[\r\n]*|\s*[\r\n]+|\s+(?!\S)|\s+";

/// o200k_base (GPT-4o) split rule.
pub const O200K_PATTERN: &str = concat!(
    r"[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]*[\p{Ll}\p{Lm}\p{Lo}\p{M}]+(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    r"|[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]+[\p{Ll}\p{Lm}\p{Lo}\p{M}]*(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    r"|\p{N}{1,3}",
    r"| ?[^\s\p{L}\p{N}]+[\r\n/]*",
    r"|\s*[\r\n]+",
    r"|\s+(?!\S)",
    r"|\s+",
);

/// End of text marker.
pub const ENDOFTEXT: &str = "<|endoftext|>";
/// Fill-in-the-middle: prefix marker.
pub const FIM_PREFIX: &str = "<|fim_prefix|>";
/// Fill-in-the-middle: middle marker.
pub const FIM_MIDDLE: &str = "<|fim_middle|>";
/// Fill-in-the-middle: suffix marker.
pub const FIM_SUFFIX: &str = "<|fim_suffix|>";
/// End of prompt marker.
pub const ENDOFPROMPT: &str = "<|endofprompt|>";
