//! Special token policy for encoding.
//!
//! Callers choose which special tokens may be emitted and which must be
//! rejected when they appear in the input. Matching of allowed tokens is
//! leftmost-longest, so a literal that extends another wins at the same
//! start offset.

use ahash::AHashSet;
use aho_corasick::{AhoCorasick, MatchKind};
use ranktok_core::{Rank, Result, TokenizerError};

/// A selection of special token literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialSet<'a> {
    /// No special tokens
    None,
    /// Every registered special token
    All,
    /// Exactly these literals
    Some(AHashSet<&'a str>),
}

impl<'a> SpecialSet<'a> {
    /// Build a `Some` selection from literals.
    pub fn some<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::Some(tokens.into_iter().collect())
    }

    /// Whether the selection names `token`.
    ///
    /// `All` answers yes for any literal; registration is checked by the
    /// tokenizer, not here.
    pub fn contains(&self, token: &str) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Some(set) => set.contains(token),
        }
    }
}

impl<'a> FromIterator<&'a str> for SpecialSet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::some(iter)
    }
}

/// Input to a single-token lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleToken<'a> {
    /// Checked against special tokens first, then ordinary ranks
    Text(&'a str),
    /// Checked against ordinary ranks first, then special tokens
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for SingleToken<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for SingleToken<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for SingleToken<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SingleToken<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes.as_slice())
    }
}

/// Literal matcher over a set of allowed special tokens.
#[derive(Debug, Clone)]
pub(crate) struct SpecialMatcher {
    automaton: AhoCorasick,
    /// ID for each pattern index of the automaton
    ids: Vec<Rank>,
}

impl SpecialMatcher {
    /// Build a matcher, or `None` when there is nothing to match.
    pub(crate) fn new<'s, I>(tokens: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = (&'s str, Rank)>,
    {
        let (literals, ids): (Vec<&str>, Vec<Rank>) = tokens.into_iter().unzip();
        if literals.is_empty() {
            return Ok(None);
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&literals)
            .map_err(|e| {
                TokenizerError::InvalidConfig(format!("Failed to build special token matcher: {}", e))
            })?;

        Ok(Some(Self { automaton, ids }))
    }

    /// Non-overlapping matches as `(start, end, id)`, left to right.
    pub(crate) fn find_iter<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = (usize, usize, Rank)> + 'a {
        self.automaton
            .find_iter(text)
            .map(move |m| (m.start(), m.end(), self.ids[m.pattern().as_usize()]))
    }

    /// Number of literals in the automaton.
    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Earliest occurrence of any literal in `text`, as `(offset, literal)`.
///
/// Ties on the offset go to the lexicographically smaller literal so the
/// result does not depend on set iteration order.
pub(crate) fn earliest_occurrence<'t, I>(text: &str, literals: I) -> Option<(usize, &'t str)>
where
    I: IntoIterator<Item = &'t str>,
{
    literals
        .into_iter()
        .filter(|literal| !literal.is_empty())
        .filter_map(|literal| text.find(literal).map(|pos| (pos, literal)))
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_set_contains() {
        assert!(!SpecialSet::None.contains("<|endoftext|>"));
        assert!(SpecialSet::All.contains("<|endoftext|>"));

        let set = SpecialSet::some(["<|endoftext|>"]);
        assert!(set.contains("<|endoftext|>"));
        assert!(!set.contains("<|fim_prefix|>"));
    }

    #[test]
    fn test_special_set_from_iter() {
        let set: SpecialSet = vec!["<a>", "<b>"].into_iter().collect();
        assert_eq!(set, SpecialSet::some(["<b>", "<a>"]));
    }

    #[test]
    fn test_single_token_conversions() {
        assert_eq!(SingleToken::from("ab"), SingleToken::Text("ab"));
        assert_eq!(SingleToken::from(b"ab"), SingleToken::Bytes(b"ab"));
        assert_eq!(SingleToken::from(&b"ab"[..]), SingleToken::Bytes(b"ab"));
    }

    #[test]
    fn test_matcher_leftmost_longest() {
        let matcher = SpecialMatcher::new([("<s>", 10), ("<s>x", 11)])
            .unwrap()
            .unwrap();
        assert_eq!(matcher.len(), 2);

        let found: Vec<_> = matcher.find_iter("a<s>xb<s>").collect();
        assert_eq!(found, vec![(1, 5, 11), (6, 9, 10)]);
    }

    #[test]
    fn test_matcher_empty() {
        let matcher = SpecialMatcher::new(std::iter::empty()).unwrap();
        assert!(matcher.is_none());
    }

    #[test]
    fn test_earliest_occurrence() {
        let text = "x<|fim_prefix|>y<|endoftext|>";
        let found = earliest_occurrence(text, ["<|endoftext|>", "<|fim_prefix|>"]);
        assert_eq!(found, Some((1, "<|fim_prefix|>")));

        assert_eq!(earliest_occurrence("plain", ["<|endoftext|>"]), None);
        assert_eq!(earliest_occurrence("plain", [""]), None);
    }
}
