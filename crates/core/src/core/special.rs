//! Special token storage.
//!
//! Special tokens are literal strings with reserved IDs outside the ordinary
//! rank table. They never take part in merging.

use crate::core::ranks::Rank;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// Forward mapping: special token literal -> ID
pub type SpecialTokenTable = AHashMap<String, Rank>;

/// Special token table with its reverse mapping.
#[derive(Debug, Clone, Default)]
pub struct SpecialTokens {
    /// Literal -> ID
    encoder: SpecialTokenTable,
    /// ID -> literal bytes
    decoder: AHashMap<Rank, Vec<u8>>,
}

impl SpecialTokens {
    /// Build the table, rejecting empty literals and IDs shared by two literals.
    pub fn new(encoder: SpecialTokenTable) -> Result<Self> {
        let mut decoder = AHashMap::with_capacity(encoder.len());

        for (token, &id) in &encoder {
            if token.is_empty() {
                return Err(TokenizerError::InvalidConfig(
                    "Special token literal must not be empty".to_string(),
                ));
            }
            if let Some(existing) = decoder.insert(id, token.as_bytes().to_vec()) {
                return Err(TokenizerError::InvalidConfig(format!(
                    "Special tokens {:?} and {:?} share id {}",
                    String::from_utf8_lossy(&existing),
                    token,
                    id
                )));
            }
        }

        Ok(Self { encoder, decoder })
    }

    /// Get the ID for a special token literal.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<Rank> {
        self.encoder.get(token).copied()
    }

    /// Get the literal bytes for a special token ID.
    #[inline]
    pub fn get_bytes(&self, id: Rank) -> Option<&[u8]> {
        self.decoder.get(&id).map(Vec::as_slice)
    }

    /// Check if an ID belongs to a special token.
    #[inline]
    pub fn is_special(&self, id: Rank) -> bool {
        self.decoder.contains_key(&id)
    }

    /// Check if a literal is a registered special token.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.encoder.contains_key(token)
    }

    /// All registered literals, sorted.
    pub fn literals(&self) -> Vec<&str> {
        let mut literals: Vec<&str> = self.encoder.keys().map(String::as_str).collect();
        literals.sort_unstable();
        literals
    }

    /// Iterate over (literal, ID) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rank)> + '_ {
        self.encoder.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Largest special token ID.
    pub fn max_id(&self) -> Option<Rank> {
        self.encoder.values().copied().max()
    }

    /// Number of special tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.encoder.len()
    }

    /// Check if there are no special tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.encoder.is_empty()
    }
}
