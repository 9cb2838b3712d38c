//! OxiHuff CLI - static Huffman compression
//!
//! Compresses and decompresses single files or standard streams.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_decode, cmd_encode, cmd_info, cmd_test};
use oxihuff_core::HuffmanConfig;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust static Huffman compressor")]
#[command(long_about = "
OxiHuff compresses a byte stream with a static Huffman code built from the
stream's own symbol counts. The code tree is stored in the output, so any
file can be decoded without outside information.

Input defaults to stdin and output to stdout.

Examples:
  oxihuff encode -i notes.txt -o notes.huff -v
  oxihuff decode -i notes.huff -o notes.txt
  cat notes.txt | oxihuff encode > notes.huff
  oxihuff info notes.huff
  oxihuff test notes.huff

Set RUST_LOG=debug for diagnostic output on stderr.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "e")]
    Encode {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print compression statistics to stderr
        #[arg(short, long)]
        verbose: bool,

        /// I/O block size in bytes
        #[arg(short, long, default_value_t = HuffmanConfig::DEFAULT.block_size)]
        block_size: usize,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decode {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print decompression statistics to stderr
        #[arg(short, long)]
        verbose: bool,

        /// I/O block size in bytes
        #[arg(short, long, default_value_t = HuffmanConfig::DEFAULT.block_size)]
        block_size: usize,
    },

    /// Show the header of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Test compressed file integrity
    #[command(alias = "t")]
    Test {
        /// Compressed file to test
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            verbose,
            block_size,
        } => cmd_encode(
            input.as_deref(),
            output.as_deref(),
            verbose,
            HuffmanConfig::new(block_size),
        ),
        Commands::Decode {
            input,
            output,
            verbose,
            block_size,
        } => cmd_decode(
            input.as_deref(),
            output.as_deref(),
            verbose,
            HuffmanConfig::new(block_size),
        ),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Test { file, verbose } => cmd_test(&file, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
