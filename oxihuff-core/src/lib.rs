//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman compressor.
//!
//! This crate provides the building blocks shared by the encoder and the
//! decoder:
//!
//! - [`bitstream`]: Block-buffered bit I/O (the bit channel)
//! - [`config`]: Codec configuration
//! - [`stats`]: Per-session byte accounting
//! - [`traits`]: Collaborator traits (statistics sink)
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI (oxihuff-cli)                                   │
//! │     argument parsing, files, permissions, statistics   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec (oxihuff-huffman)                             │
//! │     queue, tree, code table, tree dump, header         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, config, stats, errors         │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod config;
pub mod error;
pub mod stats;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use config::HuffmanConfig;
pub use error::{ErrorKind, OxiHuffError, Result};
pub use stats::SessionStats;
pub use traits::{SessionKind, StatsSink};
