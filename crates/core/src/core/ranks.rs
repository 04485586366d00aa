//! Rank table storage and validation.
//!
//! A rank table maps byte sequences to their merge priority. In tiktoken-style
//! vocabularies the rank doubles as the token ID, so the same table drives both
//! merging and the final ID lookup.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// Merge priority of a byte sequence, also its token ID.
pub type Rank = u32;

/// Rank of a pair that must never merge.
pub const UNRANKED: Rank = Rank::MAX;

/// Forward mapping: byte sequence -> rank
pub type RankTable = AHashMap<Vec<u8>, Rank>;

/// Reverse mapping: rank -> byte sequence
pub type RankDecoder = AHashMap<Rank, Vec<u8>>;

/// Build the reverse mapping of a rank table.
///
/// Fails if two byte sequences share a rank or if a table entry uses the
/// reserved [`UNRANKED`] value.
pub fn build_decoder(ranks: &RankTable) -> Result<RankDecoder> {
    let mut decoder = RankDecoder::with_capacity(ranks.len());

    for (bytes, &rank) in ranks {
        if rank == UNRANKED {
            return Err(TokenizerError::InvalidConfig(format!(
                "Rank {} is reserved and cannot be assigned to {:?}",
                UNRANKED,
                String::from_utf8_lossy(bytes)
            )));
        }

        if let Some(existing) = decoder.insert(rank, bytes.clone()) {
            // Order the pair so the message does not depend on hash order
            let (first, second) = if existing <= *bytes {
                (existing, bytes.clone())
            } else {
                (bytes.clone(), existing)
            };
            return Err(TokenizerError::DuplicateRank {
                rank,
                first,
                second,
            });
        }
    }

    Ok(decoder)
}

/// Byte values that have no single-byte entry in the table, ascending.
pub fn missing_single_bytes(ranks: &RankTable) -> Vec<u8> {
    (0..=u8::MAX)
        .filter(|b| !ranks.contains_key(std::slice::from_ref(b)))
        .collect()
}

/// Check that every byte value 0-255 is present as a length-1 key.
pub fn validate_byte_coverage(ranks: &RankTable) -> Result<()> {
    let missing = missing_single_bytes(ranks);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TokenizerError::IncompleteVocabulary { missing })
    }
}

/// Largest rank in the table, or `None` for an empty table.
#[inline]
pub fn max_rank(ranks: &RankTable) -> Option<Rank> {
    ranks.values().copied().max()
}

/// Rank table holding exactly the 256 single bytes, byte `b` at rank `b`.
pub fn byte_ranks() -> RankTable {
    let mut ranks = RankTable::with_capacity(256);
    for b in 0..=u8::MAX {
        ranks.insert(vec![b], b as Rank);
    }
    ranks
}
