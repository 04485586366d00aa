//! ranktok CLI - Command-line interface for the BPE tokenizer.
//!
//! This is the main entry point for the `ranktok` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BenchmarkCommand, CountCommand, DecodeCommand, EncodeCommand, ExportCommand};

#[derive(Parser)]
#[command(name = "ranktok")]
#[command(about = "A tiktoken-compatible BPE tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text to token IDs
    Encode(EncodeCommand),
    /// Decode token IDs back to text
    Decode(DecodeCommand),
    /// Count the tokens in a text
    Count(CountCommand),
    /// Benchmark encoding performance
    Benchmark(BenchmarkCommand),
    /// Write a tokenizer bundle to a directory
    Export(ExportCommand),
}

/// Setup logging, honoring RUST_LOG when set.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Decode(cmd) => commands::decode::run(cmd)?,
        Commands::Count(cmd) => commands::count::run(cmd)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd)?,
        Commands::Export(cmd) => commands::export::run(cmd)?,
    }

    Ok(())
}
