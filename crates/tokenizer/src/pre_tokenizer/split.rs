//! Text splitting for pre-tokenization.
//!
//! The pre-tokenization pattern partitions text into pieces before BPE
//! merging. Patterns that the `regex` crate accepts run on it directly; the
//! reference patterns need a negative lookahead (`\s+(?!\S)`), so anything
//! `regex` rejects is compiled with `fancy-regex` instead. Both engines use
//! leftmost-first alternation, so splits are identical either way.

use ranktok_core::{Result, TokenizerError};
use tracing::debug;

/// Compiled pattern backend.
#[derive(Debug, Clone)]
enum SplitEngine {
    /// Finite automaton engine, for patterns without lookaround
    Standard(regex::Regex),
    /// Backtracking engine, for lookahead and possessive quantifiers
    Fancy(fancy_regex::Regex),
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone)]
pub struct Splitter {
    /// Source pattern, kept for reporting
    pattern: String,
    /// Compiled engine
    engine: SplitEngine,
}

impl Splitter {
    /// Compile a splitter from a pattern string.
    pub fn new(pattern: &str) -> Result<Self> {
        let engine = match regex::Regex::new(pattern) {
            Ok(re) => SplitEngine::Standard(re),
            Err(standard_err) => {
                debug!(%standard_err, "pattern needs the backtracking engine");
                let re = fancy_regex::Regex::new(pattern).map_err(|e| TokenizerError::Pattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
                SplitEngine::Fancy(re)
            }
        };

        Ok(Self {
            pattern: pattern.to_string(),
            engine,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the backtracking engine is in use.
    pub fn is_fancy(&self) -> bool {
        matches!(self.engine, SplitEngine::Fancy(_))
    }

    /// Call `f` with each piece of `text`, left to right.
    ///
    /// Pieces are the non-overlapping matches of the pattern; text between
    /// matches is skipped, as with any find-all.
    pub fn for_each_piece<'t, F>(&self, text: &'t str, mut f: F) -> Result<()>
    where
        F: FnMut(&'t str) -> Result<()>,
    {
        match &self.engine {
            SplitEngine::Standard(re) => {
                for m in re.find_iter(text) {
                    f(m.as_str())?;
                }
            }
            SplitEngine::Fancy(re) => {
                for m in re.find_iter(text) {
                    let m = m.map_err(|e| {
                        TokenizerError::Tokenization(format!("Pre-tokenization failed: {}", e))
                    })?;
                    f(m.as_str())?;
                }
            }
        }
        Ok(())
    }

    /// Split text into pieces.
    pub fn split<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut pieces = Vec::new();
        self.for_each_piece(text, |piece| {
            pieces.push(piece);
            Ok(())
        })?;
        Ok(pieces)
    }
}
