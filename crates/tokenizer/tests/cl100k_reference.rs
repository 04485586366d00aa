//! Reference checks against the real cl100k_base vocabulary.
//!
//! Set `RANKTOK_CL100K_BASE` to the path of `cl100k_base.tiktoken` to run
//! these; without it every test returns early.

use ranktok::{
    load_tiktoken_bpe, DecodeMode, SpecialSet, Tokenizer, CL100K_PATTERN, ENDOFPROMPT, ENDOFTEXT,
    FIM_MIDDLE, FIM_PREFIX, FIM_SUFFIX,
};

fn cl100k() -> Option<Tokenizer> {
    let path = std::env::var_os("RANKTOK_CL100K_BASE")?;
    let ranks = load_tiktoken_bpe(path).expect("cl100k_base.tiktoken must parse");

    let tokenizer = Tokenizer::builder()
        .name("cl100k_base")
        .pattern(CL100K_PATTERN)
        .ranks(ranks)
        .special_token(ENDOFTEXT, 100_257)
        .special_token(FIM_PREFIX, 100_258)
        .special_token(FIM_MIDDLE, 100_259)
        .special_token(FIM_SUFFIX, 100_260)
        .special_token(ENDOFPROMPT, 100_276)
        .build()
        .expect("cl100k_base must build");
    Some(tokenizer)
}

#[test]
fn hello_world() {
    let Some(tok) = cl100k() else {
        eprintln!("RANKTOK_CL100K_BASE not set, skipping");
        return;
    };

    assert_eq!(tok.encode_ordinary("Hello, world!").unwrap(), vec![9906, 11, 1917, 0]);
    assert_eq!(tok.n_vocab(), 100_277);
}

#[test]
fn special_and_round_trip() {
    let Some(tok) = cl100k() else {
        return;
    };

    let tokens = tok
        .encode_with_allowed("hello <|endoftext|>", &SpecialSet::All)
        .unwrap();
    assert_eq!(tokens.last(), Some(&100_257));

    let text = "The quick brown fox 🦊 jumps over 12345 lazy dogs.\n\n  你好";
    let tokens = tok.encode_ordinary(text).unwrap();
    assert_eq!(tok.decode(&tokens, DecodeMode::Strict).unwrap(), text);
}
