//! Shared fixtures for integration tests.

#![allow(dead_code)]

use ranktok::{byte_ranks, Rank, RankTable, Tokenizer, CL100K_PATTERN, ENDOFTEXT, FIM_PREFIX};

pub const EOT_ID: Rank = 100_257;
pub const FIM_PREFIX_ID: Rank = 100_258;

/// Byte table plus a few merges, including multi-byte CJK entries.
pub fn synthetic_ranks() -> RankTable {
    let merges: [&[u8]; 12] = [
        b"@#",
        &"你".as_bytes()[..2],
        &"好".as_bytes()[..2],
        "你".as_bytes(),
        "好".as_bytes(),
        b"He",
        b"ll",
        b"llo",
        b"Hello",
        b" w",
        b"or",
        b"ld",
    ];

    let mut ranks = byte_ranks();
    for (i, bytes) in merges.iter().enumerate() {
        ranks.insert(bytes.to_vec(), 256 + i as Rank);
    }
    ranks
}

/// cl100k-patterned tokenizer over [`synthetic_ranks`].
pub fn synthetic_tokenizer() -> Tokenizer {
    Tokenizer::builder()
        .name("synthetic")
        .pattern(CL100K_PATTERN)
        .ranks(synthetic_ranks())
        .special_token(ENDOFTEXT, EOT_ID)
        .special_token(FIM_PREFIX, FIM_PREFIX_ID)
        .build()
        .expect("synthetic tokenizer must build")
}
