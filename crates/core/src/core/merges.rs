//! Byte pair merge engine.
//!
//! Given the bytes of one pre-tokenized piece and a rank table, the engine
//! repeatedly merges the adjacent pair with the lowest rank until no ranked
//! pair remains, then resolves each surviving segment to its rank.
//!
//! The working state is a flat list of `(byte offset, rank)` boundaries. The
//! rank stored at boundary `i` is the rank of the span that would be formed by
//! merging the segment starting at `i` with the segment after it. Two sentinel
//! boundaries with [`UNRANKED`] close the list so the lookahead in
//! [`span_rank`] never needs a bounds special case.

use crate::core::ranks::{Rank, RankTable, UNRANKED};
use crate::error::{Result, TokenizerError};

/// A merge boundary: byte offset into the piece and the rank of the pair
/// starting there.
type Part = (usize, Rank);

#[inline]
fn rank_of(ranks: &RankTable, bytes: &[u8]) -> Rank {
    ranks.get(bytes).copied().unwrap_or(UNRANKED)
}

/// Rank of the span from boundary `i` to boundary `i + 3`, i.e. what the pair
/// at `i` becomes once the boundary after `i` is removed.
#[inline]
fn span_rank(piece: &[u8], ranks: &RankTable, parts: &[Part], i: usize) -> Rank {
    if i + 3 < parts.len() {
        rank_of(ranks, &piece[parts[i].0..parts[i + 3].0])
    } else {
        UNRANKED
    }
}

/// First boundary holding the lowest rank, ignoring the closing sentinel.
#[inline]
fn find_min(parts: &[Part]) -> (Rank, usize) {
    let mut min_rank = (UNRANKED, usize::MAX);
    for (i, &(_, rank)) in parts[..parts.len() - 1].iter().enumerate() {
        // strict comparison keeps the leftmost boundary on ties
        if rank < min_rank.0 {
            min_rank = (rank, i);
        }
    }
    min_rank
}

/// Run the merge loop on a piece of at least two bytes.
///
/// Returns the final boundary list; consecutive offsets delimit the segments.
fn byte_pair_merge(piece: &[u8], ranks: &RankTable, max_iterations: usize) -> Result<Vec<Part>> {
    debug_assert!(piece.len() >= 2);

    let mut parts: Vec<Part> = Vec::with_capacity(piece.len() + 1);
    for i in 0..piece.len() - 1 {
        parts.push((i, rank_of(ranks, &piece[i..i + 2])));
    }
    parts.push((piece.len() - 1, UNRANKED));
    parts.push((piece.len(), UNRANKED));

    let mut min_rank = find_min(&parts);
    let mut iterations = 0usize;

    while min_rank.0 != UNRANKED {
        iterations += 1;
        if iterations > max_iterations {
            return Err(TokenizerError::MergeLimitExceeded {
                piece_len: piece.len(),
                iterations,
                boundaries: parts.iter().map(|&(offset, _)| offset).collect(),
            });
        }

        let i = min_rank.1;

        // Both ranks are computed against the list before the removal, hence
        // the three-boundary lookahead in span_rank.
        if i > 0 {
            parts[i - 1].1 = span_rank(piece, ranks, &parts, i - 1);
        }
        parts[i].1 = span_rank(piece, ranks, &parts, i);
        parts.remove(i + 1);

        min_rank = find_min(&parts);
    }

    Ok(parts)
}

/// Segment byte ranges of a piece after merging.
fn merged_segments(piece: &[u8], ranks: &RankTable) -> Result<Vec<(usize, usize)>> {
    match piece.len() {
        0 => Ok(Vec::new()),
        1 => Ok(vec![(0, 1)]),
        n => {
            let parts = byte_pair_merge(piece, ranks, 2 * n)?;
            Ok(parts.windows(2).map(|w| (w[0].0, w[1].0)).collect())
        }
    }
}

/// Encode one piece into ranks, appending to `out`.
///
/// On failure `out` is restored to its original length so callers never see a
/// partially encoded piece.
pub fn byte_pair_encode_into(piece: &[u8], ranks: &RankTable, out: &mut Vec<Rank>) -> Result<()> {
    let start = out.len();

    for (lo, hi) in merged_segments(piece, ranks)? {
        match ranks.get(&piece[lo..hi]) {
            Some(&rank) => out.push(rank),
            None => {
                out.truncate(start);
                return Err(TokenizerError::VocabularyGap {
                    bytes: piece[lo..hi].to_vec(),
                });
            }
        }
    }

    Ok(())
}

/// Encode one piece into ranks.
///
/// A single byte is looked up directly; longer pieces go through the merge
/// loop. An empty piece yields no tokens.
pub fn byte_pair_encode(piece: &[u8], ranks: &RankTable) -> Result<Vec<Rank>> {
    let mut out = Vec::with_capacity(piece.len());
    byte_pair_encode_into(piece, ranks, &mut out)?;
    Ok(out)
}

/// Split one piece into the byte segments the merge loop settles on.
///
/// Segments are not checked against the table; use [`byte_pair_encode`] for
/// that.
pub fn byte_pair_split<'a>(piece: &'a [u8], ranks: &RankTable) -> Result<Vec<&'a [u8]>> {
    Ok(merged_segments(piece, ranks)?
        .into_iter()
        .map(|(lo, hi)| &piece[lo..hi])
        .collect())
}
