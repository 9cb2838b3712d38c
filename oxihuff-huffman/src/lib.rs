//! # OxiHuff Huffman
//!
//! Pure Rust static Huffman compression of byte streams.
//!
//! A stream is a fixed 16-byte header, a serialized code tree and a
//! bit-packed body:
//!
//! - **Header**: magic, source permission bits, tree size, symbol count
//! - **Tree**: post-order dump, `L<symbol>` for leaves and `I` for branches
//! - **Body**: one code per source byte, least significant bit first
//!
//! Encoding is two-pass. The source is scanned once to count symbols, then
//! rewound and encoded. Decoding is a single pass that walks the rebuilt
//! tree bit by bit.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_huffman::{compress, decompress};
//!
//! let original = b"abracadabra";
//!
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use oxihuff_core::HuffmanConfig;
//! use oxihuff_huffman::{HuffmanDecoder, HuffmanEncoder};
//! use std::io::Cursor;
//!
//! let encoder = HuffmanEncoder::new(HuffmanConfig::default())
//!     .unwrap()
//!     .with_permissions(0o644);
//! let mut stream = Vec::new();
//! let report = encoder
//!     .encode(&mut Cursor::new(b"hello, world"), &mut stream)
//!     .unwrap();
//! assert_eq!(report.header.file_size, 12);
//!
//! let decoder = HuffmanDecoder::new(HuffmanConfig::default()).unwrap();
//! let mut restored = Vec::new();
//! decoder.decode(&mut Cursor::new(&stream), &mut restored).unwrap();
//! assert_eq!(restored, b"hello, world");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod decode;
pub mod dump;
pub mod encode;
pub mod frequency;
pub mod header;
pub mod queue;
pub mod stack;
pub mod tree;

// Re-exports
pub use code::{Code, CodeTable};
pub use decode::HuffmanDecoder;
pub use dump::{INTERNAL_TAG, LEAF_TAG, dump, rebuild};
pub use encode::HuffmanEncoder;
pub use frequency::FrequencyTable;
pub use header::{HEADER_SIZE, Header, MAGIC};
pub use queue::{BoundedQueue, Weighted};
pub use stack::BoundedStack;
pub use tree::{CodeTree, Node};

use oxihuff_core::config::HuffmanConfig;
use oxihuff_core::error::Result;
use oxihuff_core::stats::SessionStats;
use serde::Serialize;
use std::io::Cursor;

/// Outcome of one encode or decode session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Header written (encode) or read (decode).
    pub header: Header,
    /// Byte counts of the session.
    pub stats: SessionStats,
}

/// Compress a byte slice with the default configuration.
///
/// The header's permission field is zero.
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::{HEADER_SIZE, compress};
///
/// let compressed = compress(b"aaaaaaaab").unwrap();
/// // Header, a five-byte tree and two body bytes.
/// assert_eq!(compressed.len(), HEADER_SIZE + 5 + 2);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, HuffmanConfig::default())
}

/// Compress a byte slice with the given configuration.
pub fn compress_with(data: &[u8], config: HuffmanConfig) -> Result<Vec<u8>> {
    let encoder = HuffmanEncoder::new(config)?;
    let mut out = Vec::new();
    encoder.encode(&mut Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Decompress a complete stream held in memory.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, HuffmanConfig::default())
}

/// Decompress a complete stream with the given configuration.
pub fn decompress_with(data: &[u8], config: HuffmanConfig) -> Result<Vec<u8>> {
    let decoder = HuffmanDecoder::new(config)?;
    let mut out = Vec::new();
    decoder.decode(&mut Cursor::new(data), &mut out)?;
    Ok(out)
}
