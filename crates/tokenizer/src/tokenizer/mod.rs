//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that combines a
//! rank table, a special token table and a pre-tokenization pattern.

pub mod decode;
pub mod special;

pub use decode::{decode_ignoring, DecodeMode};
pub use special::{SingleToken, SpecialSet};

use self::special::{earliest_occurrence, SpecialMatcher};
use crate::pre_tokenizer::{Splitter, CL100K_PATTERN};
use ahash::AHashSet;
use ranktok_core::{
    validate_byte_coverage, ByteLevelEncoder, Rank, RankTable, Result, SpecialTokenTable,
    SpecialTokens, TokenizerError,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Encoding name, used for reporting and cache keys
    pub name: String,
    /// Pre-tokenization pattern
    pub pattern: String,
    /// Special token literals and their IDs
    pub special_tokens: SpecialTokenTable,
    /// Require all 256 single-byte entries in the rank table
    pub validate_byte_coverage: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            pattern: CL100K_PATTERN.to_string(),
            special_tokens: SpecialTokenTable::new(),
            validate_byte_coverage: true,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
    ranks: Option<Arc<RankTable>>,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoding name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the pre-tokenization pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = pattern.into();
        self
    }

    /// Set the rank table.
    pub fn ranks(mut self, ranks: RankTable) -> Self {
        self.ranks = Some(Arc::new(ranks));
        self
    }

    /// Set a rank table shared with other tokenizers.
    pub fn shared_ranks(mut self, ranks: Arc<RankTable>) -> Self {
        self.ranks = Some(ranks);
        self
    }

    /// Replace the special token table.
    pub fn special_tokens(mut self, tokens: SpecialTokenTable) -> Self {
        self.config.special_tokens = tokens;
        self
    }

    /// Register one special token.
    pub fn special_token(mut self, literal: impl Into<String>, id: Rank) -> Self {
        self.config.special_tokens.insert(literal.into(), id);
        self
    }

    /// Enable or disable the single-byte coverage check.
    pub fn validate_byte_coverage(mut self, validate: bool) -> Self {
        self.config.validate_byte_coverage = validate;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        let ranks = self.ranks.ok_or_else(|| {
            TokenizerError::InvalidConfig("Tokenizer requires a rank table".to_string())
        })?;
        Tokenizer::from_config(self.config, ranks)
    }
}

/// Allowed special tokens resolved against the registered table.
enum AllowedMatcher<'t> {
    /// Nothing to match, ordinary encoding only
    Ordinary,
    /// Prebuilt matcher over every special token
    Shared(&'t SpecialMatcher),
    /// Matcher over a caller-chosen subset
    Owned(SpecialMatcher),
}

impl AllowedMatcher<'_> {
    fn get(&self) -> Option<&SpecialMatcher> {
        match self {
            Self::Ordinary => None,
            Self::Shared(matcher) => Some(*matcher),
            Self::Owned(matcher) => Some(matcher),
        }
    }
}

/// Main tokenizer struct.
///
/// Immutable after construction. Tables are shared behind `Arc`, so clones
/// are cheap and a single instance can serve many threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Encoding name
    name: String,
    /// Ordinary tokens
    encoder: ByteLevelEncoder,
    /// Special tokens
    special: Arc<SpecialTokens>,
    /// Matcher over every special token, `None` when there are none
    special_matcher: Option<SpecialMatcher>,
    /// Pre-tokenization splitter
    splitter: Splitter,
    /// Largest ID over both tables
    max_token_value: Rank,
}

impl Tokenizer {
    /// Create a tokenizer from its four parts.
    ///
    /// # Arguments
    /// * `name` - Encoding name
    /// * `pattern` - Pre-tokenization pattern
    /// * `ranks` - Byte sequence to rank table
    /// * `special_tokens` - Special token literal to ID table
    pub fn new(
        name: &str,
        pattern: &str,
        ranks: RankTable,
        special_tokens: SpecialTokenTable,
    ) -> Result<Self> {
        Self::builder()
            .name(name)
            .pattern(pattern)
            .ranks(ranks)
            .special_tokens(special_tokens)
            .build()
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Create a tokenizer from a configuration and a shared rank table.
    pub fn from_config(config: TokenizerConfig, ranks: Arc<RankTable>) -> Result<Self> {
        let TokenizerConfig {
            name,
            pattern,
            special_tokens,
            validate_byte_coverage: validate,
        } = config;

        if validate {
            validate_byte_coverage(&ranks)?;
        } else {
            warn!(name = %name, "single-byte coverage check disabled");
        }

        let encoder = ByteLevelEncoder::with_arc(ranks)?;
        let special = SpecialTokens::new(special_tokens)?;

        for literal in special.literals() {
            if let Some(id) = special.get_id(literal) {
                if encoder.contains_rank(id) {
                    return Err(TokenizerError::SpecialTokenCollision {
                        token: literal.to_string(),
                        id,
                    });
                }
            }
        }

        let splitter = Splitter::new(&pattern)?;
        let special_matcher = SpecialMatcher::new(special.iter())?;

        let max_token_value = encoder
            .max_rank()
            .into_iter()
            .chain(special.max_id())
            .fold(None, |acc: Option<Rank>, id| Some(acc.map_or(id, |m| m.max(id))))
            .ok_or_else(|| {
                TokenizerError::InvalidConfig(format!("Tokenizer '{}' has no tokens", name))
            })?;

        debug!(
            name = %name,
            ranks = encoder.len(),
            special = special.len(),
            max_token_value,
            fancy_regex = splitter.is_fancy(),
            "built tokenizer"
        );

        Ok(Self {
            name,
            encoder,
            special: Arc::new(special),
            special_matcher,
            splitter,
            max_token_value,
        })
    }

    /// Encode text, treating special token literals as ordinary text.
    pub fn encode_ordinary(&self, text: &str) -> Result<Vec<Rank>> {
        let mut out = Vec::with_capacity(text.len() / 4 + 1);
        self.encode_ordinary_into(text, &mut out)?;
        Ok(out)
    }

    /// Encode ordinary text, appending to `out`.
    fn encode_ordinary_into(&self, text: &str, out: &mut Vec<Rank>) -> Result<()> {
        self.splitter
            .for_each_piece(text, |piece| self.encoder.encode_piece_into(piece.as_bytes(), out))
    }

    /// Encode text with explicit special token policy.
    ///
    /// # Arguments
    /// * `text` - The text to encode
    /// * `allowed_special` - Special tokens emitted as their IDs
    /// * `disallowed_special` - Special tokens that fail the call if present
    ///
    /// With `disallowed_special` set to `All`, every registered special token
    /// not in `allowed_special` is disallowed.
    pub fn encode(
        &self,
        text: &str,
        allowed_special: &SpecialSet<'_>,
        disallowed_special: &SpecialSet<'_>,
    ) -> Result<Vec<Rank>> {
        self.check_disallowed(text, allowed_special, disallowed_special)?;
        let matcher = self.allowed_matcher(allowed_special)?;
        self.encode_allowed(text, &matcher)
    }

    /// Encode text, disallowing every special token not in `allowed_special`.
    pub fn encode_with_allowed(
        &self,
        text: &str,
        allowed_special: &SpecialSet<'_>,
    ) -> Result<Vec<Rank>> {
        self.encode(text, allowed_special, &SpecialSet::All)
    }

    /// Encode text, emitting every registered special token it contains.
    pub fn encode_with_special_tokens(&self, text: &str) -> Result<Vec<Rank>> {
        self.encode(text, &SpecialSet::All, &SpecialSet::None)
    }

    fn check_disallowed(
        &self,
        text: &str,
        allowed: &SpecialSet<'_>,
        disallowed: &SpecialSet<'_>,
    ) -> Result<()> {
        let found = match disallowed {
            SpecialSet::None => None,
            SpecialSet::All => earliest_occurrence(
                text,
                self.special
                    .iter()
                    .map(|(literal, _)| literal)
                    .filter(|literal| !allowed.contains(literal)),
            ),
            SpecialSet::Some(set) => earliest_occurrence(text, set.iter().copied()),
        };

        match found {
            Some((position, token)) => Err(TokenizerError::DisallowedSpecialToken {
                token: token.to_string(),
                position,
            }),
            None => Ok(()),
        }
    }

    fn allowed_matcher(&self, allowed: &SpecialSet<'_>) -> Result<AllowedMatcher<'_>> {
        let matcher = match allowed {
            SpecialSet::None => AllowedMatcher::Ordinary,
            SpecialSet::All => match &self.special_matcher {
                Some(matcher) => AllowedMatcher::Shared(matcher),
                None => AllowedMatcher::Ordinary,
            },
            SpecialSet::Some(set) => {
                // literals that are not registered cannot be emitted
                let tokens = self
                    .special
                    .iter()
                    .filter(|(literal, _)| set.contains(literal));
                match SpecialMatcher::new(tokens)? {
                    Some(matcher) => AllowedMatcher::Owned(matcher),
                    None => AllowedMatcher::Ordinary,
                }
            }
        };
        Ok(matcher)
    }

    fn encode_allowed(&self, text: &str, matcher: &AllowedMatcher<'_>) -> Result<Vec<Rank>> {
        let matcher = match matcher.get() {
            Some(matcher) => matcher,
            None => return self.encode_ordinary(text),
        };

        let mut out = Vec::with_capacity(text.len() / 4 + 1);
        let mut last = 0;
        for (start, end, id) in matcher.find_iter(text) {
            self.encode_ordinary_into(&text[last..start], &mut out)?;
            out.push(id);
            last = end;
        }
        self.encode_ordinary_into(&text[last..], &mut out)?;

        Ok(out)
    }

    /// Look up the ID of exactly one token, without merging.
    pub fn encode_single_token<'a>(&self, token: impl Into<SingleToken<'a>>) -> Result<Rank> {
        match token.into() {
            SingleToken::Text(text) => self
                .special
                .get_id(text)
                .or_else(|| self.encoder.get_rank(text.as_bytes()))
                .ok_or_else(|| TokenizerError::UnknownToken(text.as_bytes().to_vec())),
            SingleToken::Bytes(bytes) => self
                .encoder
                .get_rank(bytes)
                .or_else(|| {
                    std::str::from_utf8(bytes)
                        .ok()
                        .and_then(|text| self.special.get_id(text))
                })
                .ok_or_else(|| TokenizerError::UnknownToken(bytes.to_vec())),
        }
    }

    /// Bytes of a single token, ordinary table first.
    pub fn decode_single_token_bytes(&self, token: Rank) -> Result<&[u8]> {
        self.encoder
            .get_bytes(token)
            .or_else(|| self.special.get_bytes(token))
            .ok_or(TokenizerError::UnknownTokenId(token))
    }

    /// Bytes of each token, in order.
    pub fn decode_tokens_bytes(&self, tokens: &[Rank]) -> Result<Vec<Vec<u8>>> {
        tokens
            .iter()
            .map(|&token| self.decode_single_token_bytes(token).map(<[u8]>::to_vec))
            .collect()
    }

    /// Concatenated bytes of a token sequence.
    pub fn decode_bytes(&self, tokens: &[Rank]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(tokens.len() * 4);
        for &token in tokens {
            out.extend_from_slice(self.decode_single_token_bytes(token)?);
        }
        Ok(out)
    }

    /// Decode a token sequence to text.
    ///
    /// # Arguments
    /// * `tokens` - The token IDs to decode
    /// * `mode` - Handling of malformed UTF-8 in the concatenated bytes
    pub fn decode(&self, tokens: &[Rank], mode: DecodeMode) -> Result<String> {
        mode.apply(self.decode_bytes(tokens)?)
    }

    /// Encode a batch of texts as ordinary text (parallelized).
    pub fn encode_ordinary_batch<S>(&self, texts: &[S]) -> Result<Vec<Vec<Rank>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.encode_ordinary(text.as_ref()))
            .collect()
    }

    /// Encode a batch of texts with explicit special token policy (parallelized).
    pub fn encode_batch<S>(
        &self,
        texts: &[S],
        allowed_special: &SpecialSet<'_>,
        disallowed_special: &SpecialSet<'_>,
    ) -> Result<Vec<Vec<Rank>>>
    where
        S: AsRef<str> + Sync,
    {
        let matcher = self.allowed_matcher(allowed_special)?;
        texts
            .par_iter()
            .map(|text| {
                let text = text.as_ref();
                self.check_disallowed(text, allowed_special, disallowed_special)?;
                self.encode_allowed(text, &matcher)
            })
            .collect()
    }

    /// Decode a batch of token sequences (parallelized).
    pub fn decode_batch<T>(&self, batch: &[T], mode: DecodeMode) -> Result<Vec<String>>
    where
        T: AsRef<[Rank]> + Sync,
    {
        batch
            .par_iter()
            .map(|tokens| self.decode(tokens.as_ref(), mode))
            .collect()
    }

    /// Number of tokens in the ordinary encoding of `text`.
    pub fn count_tokens(&self, text: &str) -> Result<usize> {
        self.encode_ordinary(text).map(|tokens| tokens.len())
    }

    /// Pre-tokenization pieces of `text`.
    pub fn split_pieces<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        self.splitter.split(text)
    }

    /// Encoding name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pre-tokenization pattern.
    pub fn pattern(&self) -> &str {
        self.splitter.pattern()
    }

    /// Largest token ID over ordinary and special tokens.
    pub fn max_token_value(&self) -> Rank {
        self.max_token_value
    }

    /// Size of the ID space, `max_token_value + 1`.
    pub fn n_vocab(&self) -> usize {
        self.max_token_value as usize + 1
    }

    /// Registered special token literals.
    pub fn special_tokens_set(&self) -> AHashSet<&str> {
        self.special.iter().map(|(literal, _)| literal).collect()
    }

    /// Special token table.
    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    /// Check if an ID belongs to a special token.
    pub fn is_special_token(&self, token: Rank) -> bool {
        self.special.is_special(token)
    }

    /// Bytes of every ordinary token, sorted.
    pub fn token_byte_values(&self) -> Vec<Vec<u8>> {
        self.encoder.token_byte_values()
    }

    /// Shared handle to the rank table.
    pub fn ranks(&self) -> &Arc<RankTable> {
        self.encoder.ranks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pre_tokenizer::patterns::{ENDOFTEXT, FIM_PREFIX};
    use ranktok_core::byte_ranks;

    const WORDS: [&str; 9] = [
        "He", "ll", "llo", "Hello", " w", "or", " wor", "ld", " world",
    ];

    fn test_ranks() -> RankTable {
        let mut ranks = byte_ranks();
        for (i, word) in WORDS.iter().enumerate() {
            ranks.insert(word.as_bytes().to_vec(), 256 + i as Rank);
        }
        ranks
    }

    fn make_tokenizer() -> Tokenizer {
        Tokenizer::builder()
            .name("test")
            .ranks(test_ranks())
            .special_token(ENDOFTEXT, 1000)
            .special_token(FIM_PREFIX, 1001)
            .build()
            .unwrap()
    }

    #[test]
    fn test_encode_ordinary() {
        let tokenizer = make_tokenizer();
        assert_eq!(tokenizer.encode_ordinary("Hello world").unwrap(), vec![259, 264]);
        assert_eq!(
            tokenizer.encode_ordinary("Hello, world!").unwrap(),
            vec![259, b',' as Rank, 264, b'!' as Rank]
        );
        assert!(tokenizer.encode_ordinary("").unwrap().is_empty());
    }

    #[test]
    fn test_encode_ordinary_merges() {
        let tokenizer = make_tokenizer();
        // "Hellx" is not a vocabulary entry, so the merge loop runs
        assert_eq!(
            tokenizer.encode_ordinary("Hellx").unwrap(),
            vec![256, 257, b'x' as Rank]
        );
    }

    #[test]
    fn test_encode_ordinary_ignores_special() {
        let tokenizer = make_tokenizer();
        let text = "Hello<|endoftext|>";
        let tokens = tokenizer.encode_ordinary(text).unwrap();
        assert!(!tokens.contains(&1000));
        assert_eq!(tokenizer.decode(&tokens, DecodeMode::Strict).unwrap(), text);
    }

    #[test]
    fn test_encode_allowed_special() {
        let tokenizer = make_tokenizer();
        let tokens = tokenizer
            .encode("Hello<|endoftext|> world", &SpecialSet::All, &SpecialSet::All)
            .unwrap();
        assert_eq!(tokens, vec![259, 1000, 264]);
        assert_eq!(
            tokenizer.encode_with_special_tokens("Hello<|endoftext|> world").unwrap(),
            tokens
        );
    }

    #[test]
    fn test_encode_disallowed_special() {
        let tokenizer = make_tokenizer();
        let err = tokenizer
            .encode_with_allowed("Hello<|endoftext|>", &SpecialSet::None)
            .unwrap_err();
        match err {
            TokenizerError::DisallowedSpecialToken { token, position } => {
                assert_eq!(token, ENDOFTEXT);
                assert_eq!(position, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_disallowed_reports_earliest() {
        let tokenizer = make_tokenizer();
        let err = tokenizer
            .encode_with_allowed("x<|fim_prefix|>y<|endoftext|>", &SpecialSet::None)
            .unwrap_err();
        assert!(matches!(
            err,
            TokenizerError::DisallowedSpecialToken { ref token, position: 1 } if token == FIM_PREFIX
        ));
    }

    #[test]
    fn test_allowed_subset() {
        let tokenizer = make_tokenizer();
        let text = "<|fim_prefix|>Hello<|endoftext|>";
        let allowed = SpecialSet::some([FIM_PREFIX]);

        // the rest are disallowed by default
        let err = tokenizer.encode_with_allowed(text, &allowed).unwrap_err();
        assert!(matches!(
            err,
            TokenizerError::DisallowedSpecialToken { position: 19, .. }
        ));

        // with nothing disallowed, the other literal is plain text
        let tokens = tokenizer.encode(text, &allowed, &SpecialSet::None).unwrap();
        assert_eq!(&tokens[..2], &[1001, 259]);
        assert!(!tokens.contains(&1000));
        assert_eq!(tokenizer.decode(&tokens, DecodeMode::Strict).unwrap(), text);
    }

    #[test]
    fn test_explicit_disallowed_set() {
        let tokenizer = make_tokenizer();
        let only_eot = SpecialSet::some([ENDOFTEXT]);

        assert!(tokenizer
            .encode("<|fim_prefix|>", &SpecialSet::None, &only_eot)
            .is_ok());
        assert!(tokenizer
            .encode("a<|endoftext|>", &SpecialSet::None, &only_eot)
            .is_err());
    }

    #[test]
    fn test_leftmost_longest_special() {
        let tokenizer = Tokenizer::builder()
            .ranks(test_ranks())
            .special_token("<s>", 500)
            .special_token("<s>x", 501)
            .build()
            .unwrap();

        let tokens = tokenizer.encode_with_special_tokens("a<s>xb<s>").unwrap();
        assert_eq!(tokens, vec![b'a' as Rank, 501, b'b' as Rank, 500]);
    }

    #[test]
    fn test_encode_single_token() {
        let tokenizer = make_tokenizer();
        assert_eq!(tokenizer.encode_single_token("Hello").unwrap(), 259);
        assert_eq!(tokenizer.encode_single_token(ENDOFTEXT).unwrap(), 1000);
        assert_eq!(tokenizer.encode_single_token(b"ll").unwrap(), 257);
        assert_eq!(tokenizer.encode_single_token(b"<|endoftext|>").unwrap(), 1000);
        assert_eq!(tokenizer.encode_single_token(&[0xffu8][..]).unwrap(), 255);
        assert!(matches!(
            tokenizer.encode_single_token("Hel"),
            Err(TokenizerError::UnknownToken(_))
        ));
    }

    #[test]
    fn test_decode_bytes() {
        let tokenizer = make_tokenizer();
        assert_eq!(
            tokenizer.decode_bytes(&[259, 1000]).unwrap(),
            b"Hello<|endoftext|>".to_vec()
        );
        assert_eq!(tokenizer.decode_single_token_bytes(264).unwrap(), b" world");
        assert_eq!(
            tokenizer.decode_tokens_bytes(&[259, 264]).unwrap(),
            vec![b"Hello".to_vec(), b" world".to_vec()]
        );
        assert!(tokenizer.decode_bytes(&[]).unwrap().is_empty());
        assert!(matches!(
            tokenizer.decode_bytes(&[259, 9999]),
            Err(TokenizerError::UnknownTokenId(9999))
        ));
    }

    #[test]
    fn test_decode_modes() {
        let tokenizer = make_tokenizer();
        // "H", two bytes of a three-byte character, "i"
        let tokens = [b'H' as Rank, 0xe4, 0xbd, b'i' as Rank];

        assert!(matches!(
            tokenizer.decode(&tokens, DecodeMode::Strict),
            Err(TokenizerError::InvalidUtf8 { valid_up_to: 1, .. })
        ));
        assert_eq!(tokenizer.decode(&tokens, DecodeMode::Replace).unwrap(), "H\u{FFFD}i");
        assert_eq!(tokenizer.decode(&tokens, DecodeMode::Ignore).unwrap(), "Hi");
    }

    #[test]
    fn test_batches() {
        let tokenizer = make_tokenizer();
        let texts = ["Hello", "Hello world", ""];

        let batch = tokenizer.encode_ordinary_batch(&texts).unwrap();
        assert_eq!(batch, vec![vec![259], vec![259, 264], vec![]]);

        let decoded = tokenizer.decode_batch(&batch, DecodeMode::default()).unwrap();
        assert_eq!(decoded, texts);

        let special = tokenizer
            .encode_batch(
                &["a<|endoftext|>", "b"],
                &SpecialSet::All,
                &SpecialSet::All,
            )
            .unwrap();
        assert_eq!(special, vec![vec![b'a' as Rank, 1000], vec![b'b' as Rank]]);

        assert!(tokenizer
            .encode_batch(&["ok", "<|endoftext|>"], &SpecialSet::None, &SpecialSet::All)
            .is_err());
    }

    #[test]
    fn test_accessors() {
        let tokenizer = make_tokenizer();
        assert_eq!(tokenizer.name(), "test");
        assert_eq!(tokenizer.pattern(), CL100K_PATTERN);
        assert_eq!(tokenizer.max_token_value(), 1001);
        assert_eq!(tokenizer.n_vocab(), 1002);
        assert_eq!(tokenizer.count_tokens("Hello, world!").unwrap(), 4);
        assert_eq!(
            tokenizer.split_pieces("Hello, world!").unwrap(),
            vec!["Hello", ",", " world", "!"]
        );
        assert!(tokenizer.is_special_token(1000));
        assert!(!tokenizer.is_special_token(259));
        assert_eq!(tokenizer.token_byte_values().len(), 256 + WORDS.len());

        let set = tokenizer.special_tokens_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains(ENDOFTEXT) && set.contains(FIM_PREFIX));
    }

    #[test]
    fn test_new_from_parts() {
        let tokenizer = Tokenizer::new("plain", r"\S+|\s+", test_ranks(), SpecialTokenTable::new())
            .unwrap();
        assert_eq!(tokenizer.max_token_value(), 264);
        // the space is its own piece, and "world" merges "or" before "ld"
        assert_eq!(
            tokenizer.encode_ordinary("Hello world").unwrap(),
            vec![259, b' ' as Rank, b'w' as Rank, 261, 263]
        );
    }

    #[test]
    fn test_special_collision_rejected() {
        let result = Tokenizer::builder()
            .ranks(test_ranks())
            .special_token("<x>", 256)
            .build();
        assert!(matches!(
            result,
            Err(TokenizerError::SpecialTokenCollision { id: 256, .. })
        ));
    }

    #[test]
    fn test_incomplete_vocabulary() {
        let mut ranks = test_ranks();
        ranks.remove(&vec![b'z']);

        let result = Tokenizer::builder().ranks(ranks.clone()).build();
        match result {
            Err(TokenizerError::IncompleteVocabulary { missing }) => assert_eq!(missing, vec![b'z']),
            other => panic!("unexpected result: {other:?}"),
        }

        // without the check the gap surfaces at encode time
        let tokenizer = Tokenizer::builder()
            .ranks(ranks)
            .validate_byte_coverage(false)
            .build()
            .unwrap();
        assert!(tokenizer.encode_ordinary("Hello").is_ok());
        assert!(matches!(
            tokenizer.encode_ordinary("z"),
            Err(TokenizerError::VocabularyGap { .. })
        ));
    }

    #[test]
    fn test_duplicate_and_reserved_ranks() {
        let mut ranks = test_ranks();
        ranks.insert(b"zz".to_vec(), 256);
        assert!(matches!(
            Tokenizer::builder().ranks(ranks).build(),
            Err(TokenizerError::DuplicateRank { rank: 256, .. })
        ));

        let mut ranks = test_ranks();
        ranks.insert(b"zz".to_vec(), Rank::MAX);
        assert!(matches!(
            Tokenizer::builder().ranks(ranks).build(),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_builder_errors() {
        assert!(matches!(
            Tokenizer::builder().build(),
            Err(TokenizerError::InvalidConfig(_))
        ));
        assert!(matches!(
            Tokenizer::builder().ranks(test_ranks()).pattern("(").build(),
            Err(TokenizerError::Pattern { .. })
        ));
    }

    #[test]
    fn test_shared_ranks() {
        let ranks = Arc::new(test_ranks());
        let a = Tokenizer::builder().shared_ranks(ranks.clone()).build().unwrap();
        let b = Tokenizer::builder().shared_ranks(ranks.clone()).build().unwrap();
        assert!(Arc::ptr_eq(a.ranks(), b.ranks()));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tokenizer>();
    }
}
