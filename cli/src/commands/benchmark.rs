//! Benchmark command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Path to the bundle manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::{ensure, Context, Result as AnyhowResult};
use std::fs;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    ensure!(cmd.iterations > 0, "iterations must be at least 1");

    let tokenizer = super::load_tokenizer(&cmd.manifest)?;
    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("Failed to read {}", cmd.input.display()))?;

    println!("Benchmarking encoding...");
    println!("  Tokenizer: {}", tokenizer.name());
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let token_count = tokenizer.encode_ordinary(&text)?.len();

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        tokenizer.encode_ordinary(&text)?;
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / cmd.iterations as f64;

    println!("Results:");
    println!("  Tokens per pass: {}", token_count);
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    if avg_secs > 0.0 {
        println!("  Throughput: {:.0} tokens/s", token_count as f64 / avg_secs);
        println!(
            "  Throughput: {:.2} MB/s",
            text.len() as f64 / avg_secs / 1_000_000.0
        );
    }

    Ok(())
}
