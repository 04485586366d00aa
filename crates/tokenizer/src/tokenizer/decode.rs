//! Text decoding policies.
//!
//! Token bytes are concatenated first and converted to text once, so a
//! multi-byte character split across tokens decodes correctly.

use ranktok_core::{Result, TokenizerError};
use std::fmt;
use std::str::FromStr;

/// How malformed UTF-8 in decoded bytes is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeMode {
    /// Fail on the first invalid sequence
    Strict,
    /// Substitute U+FFFD for each maximal invalid subpart
    #[default]
    Replace,
    /// Drop invalid sequences
    Ignore,
}

impl DecodeMode {
    /// Convert a byte stream to text under this mode.
    pub fn apply(self, bytes: Vec<u8>) -> Result<String> {
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => match self {
                Self::Strict => {
                    let utf8_error = err.utf8_error();
                    Err(TokenizerError::InvalidUtf8 {
                        valid_up_to: utf8_error.valid_up_to(),
                        err: utf8_error,
                    })
                }
                Self::Replace => Ok(String::from_utf8_lossy(err.as_bytes()).into_owned()),
                Self::Ignore => Ok(decode_ignoring(err.as_bytes())),
            },
        }
    }
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Strict => "strict",
            Self::Replace => "replace",
            Self::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

impl FromStr for DecodeMode {
    type Err = TokenizerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "replace" => Ok(Self::Replace),
            "ignore" => Ok(Self::Ignore),
            other => Err(TokenizerError::InvalidConfig(format!(
                "Unknown decode mode '{}' (expected strict, replace or ignore)",
                other
            ))),
        }
    }
}

/// Decode bytes as UTF-8, skipping invalid sequences.
pub fn decode_ignoring(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    out.push_str(valid);
                }
                match err.error_len() {
                    Some(len) => bytes = &rest[len..],
                    // truncated sequence at the end of input
                    None => break,
                }
            }
        }
    }

    out
}
