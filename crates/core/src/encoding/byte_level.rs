//! Byte-level BPE encoding (tiktoken-style).
//!
//! Text is treated as raw UTF-8 bytes; the rank table is keyed directly by
//! byte sequences, so no byte-to-unicode remapping is needed. Ranks are token
//! IDs.

use crate::core::merges::byte_pair_encode_into;
use crate::core::ranks::{build_decoder, max_rank, Rank, RankDecoder, RankTable};
use crate::error::Result;
use std::sync::Arc;

/// Byte-level encoder over an immutable rank table.
///
/// Both tables sit behind `Arc`, so clones share storage and the encoder can
/// be handed to worker threads freely.
#[derive(Debug, Clone)]
pub struct ByteLevelEncoder {
    /// Byte sequence -> rank
    ranks: Arc<RankTable>,
    /// Rank -> byte sequence
    decoder: Arc<RankDecoder>,
    /// Largest rank, cached for reporting
    max_rank: Option<Rank>,
}

impl ByteLevelEncoder {
    /// Create an encoder, building the reverse table.
    pub fn new(ranks: RankTable) -> Result<Self> {
        Self::with_arc(Arc::new(ranks))
    }

    /// Create an encoder from a shared rank table without copying it.
    pub fn with_arc(ranks: Arc<RankTable>) -> Result<Self> {
        let decoder = Arc::new(build_decoder(&ranks)?);
        let max_rank = max_rank(&ranks);

        Ok(Self {
            ranks,
            decoder,
            max_rank,
        })
    }

    /// Encode one piece, appending its tokens to `out`.
    ///
    /// A piece that is itself a vocabulary entry is emitted directly without
    /// running the merge loop.
    #[inline]
    pub fn encode_piece_into(&self, piece: &[u8], out: &mut Vec<Rank>) -> Result<()> {
        if let Some(&rank) = self.ranks.get(piece) {
            out.push(rank);
            return Ok(());
        }
        byte_pair_encode_into(piece, &self.ranks, out)
    }

    /// Encode one piece into a fresh vector.
    pub fn encode_piece(&self, piece: &[u8]) -> Result<Vec<Rank>> {
        let mut out = Vec::with_capacity(piece.len());
        self.encode_piece_into(piece, &mut out)?;
        Ok(out)
    }

    /// Exact rank of a byte sequence, without merging.
    #[inline]
    pub fn get_rank(&self, bytes: &[u8]) -> Option<Rank> {
        self.ranks.get(bytes).copied()
    }

    /// Bytes of an ordinary token.
    #[inline]
    pub fn get_bytes(&self, rank: Rank) -> Option<&[u8]> {
        self.decoder.get(&rank).map(Vec::as_slice)
    }

    /// Check if a rank belongs to an ordinary token.
    #[inline]
    pub fn contains_rank(&self, rank: Rank) -> bool {
        self.decoder.contains_key(&rank)
    }

    /// Shared handle to the rank table.
    pub fn ranks(&self) -> &Arc<RankTable> {
        &self.ranks
    }

    /// Bytes of every ordinary token, sorted.
    pub fn token_byte_values(&self) -> Vec<Vec<u8>> {
        let mut values: Vec<Vec<u8>> = self.ranks.keys().cloned().collect();
        values.sort_unstable();
        values
    }

    /// Largest rank in the table.
    #[inline]
    pub fn max_rank(&self) -> Option<Rank> {
        self.max_rank
    }

    /// Number of ordinary tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranks::byte_ranks;

    fn make_encoder() -> ByteLevelEncoder {
        let mut ranks = byte_ranks();
        ranks.insert(b"He".to_vec(), 256);
        ranks.insert(b"ll".to_vec(), 257);
        ranks.insert(b"Hell".to_vec(), 258);
        ranks.insert(b"Hello".to_vec(), 259);
        ByteLevelEncoder::new(ranks).unwrap()
    }

    #[test]
    fn test_whole_piece_fast_path() {
        let encoder = make_encoder();
        assert_eq!(encoder.encode_piece(b"Hello").unwrap(), vec![259]);
    }

    #[test]
    fn test_merge_path() {
        let encoder = make_encoder();
        assert_eq!(
            encoder.encode_piece(b"Hellx").unwrap(),
            vec![258, b'x' as Rank]
        );
    }

    #[test]
    fn test_encode_into_appends() {
        let encoder = make_encoder();
        let mut out = vec![1, 2];
        encoder.encode_piece_into(b"ll", &mut out).unwrap();
        assert_eq!(out, vec![1, 2, 257]);
    }

    #[test]
    fn test_lookups() {
        let encoder = make_encoder();
        assert_eq!(encoder.get_rank(b"ll"), Some(257));
        assert_eq!(encoder.get_rank(b"lll"), None);
        assert_eq!(encoder.get_bytes(258), Some(&b"Hell"[..]));
        assert!(encoder.contains_rank(0));
        assert!(!encoder.contains_rank(260));
        assert_eq!(encoder.max_rank(), Some(259));
        assert_eq!(encoder.len(), 260);
    }

    #[test]
    fn test_token_byte_values_sorted() {
        let encoder = make_encoder();
        let values = encoder.token_byte_values();
        assert_eq!(values.len(), 260);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_clone_shares_tables() {
        let encoder = make_encoder();
        let cloned = encoder.clone();
        assert!(Arc::ptr_eq(encoder.ranks(), cloned.ranks()));
    }
}
