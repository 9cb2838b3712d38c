//! Huffman decoder.

use crate::SessionReport;
use crate::dump::rebuild;
use crate::header::{HEADER_SIZE, Header, read_section};
use crate::tree::{CodeTree, Node};
use oxihuff_core::bitstream::BitReader;
use oxihuff_core::config::HuffmanConfig;
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::stats::SessionStats;
use std::io::{Read, Write};
use tracing::debug;

/// Huffman decoder.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder {
    config: HuffmanConfig,
}

impl HuffmanDecoder {
    /// Create a decoder.
    pub fn new(config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Read the header and the code tree, leaving `source` at the body.
    pub fn read_preamble<R: Read>(&self, source: &mut R) -> Result<(Header, CodeTree)> {
        let header = Header::read(source)?;
        header.validate()?;
        debug!(
            permissions = header.permissions,
            tree_size = header.tree_size,
            file_size = header.file_size,
            "read header"
        );

        let mut tree_bytes = vec![0u8; usize::from(header.tree_size)];
        read_section(source, &mut tree_bytes, "tree")?;
        let tree = rebuild(&tree_bytes)?;
        Ok((header, tree))
    }

    /// Decompress a complete stream from `source` into `sink`.
    ///
    /// Decoding stops after `file_size` symbols; any bytes after the body
    /// are ignored. The sink is flushed on success.
    pub fn decode<R, W>(&self, source: &mut R, sink: &mut W) -> Result<SessionReport>
    where
        R: Read,
        W: Write,
    {
        let (header, tree) = self.read_preamble(source)?;

        let body_bytes = if header.file_size == 0 {
            0
        } else {
            self.read_body(source, sink, &tree, header.file_size)?
        };
        sink.flush()?;

        let stats = SessionStats {
            bytes_read: (HEADER_SIZE + usize::from(header.tree_size)) as u64 + body_bytes,
            bytes_written: header.file_size,
            symbols: header.file_size,
        };
        debug!(
            bytes_read = stats.bytes_read,
            bytes_written = stats.bytes_written,
            "decode finished"
        );
        Ok(SessionReport { header, stats })
    }

    /// Walk the tree bit by bit, emitting a symbol at every leaf.
    /// Returns the number of body bytes consumed, excluding anything the
    /// reader buffered past the last code.
    fn read_body<R: Read, W: Write>(
        &self,
        source: &mut R,
        sink: &mut W,
        tree: &CodeTree,
        file_size: u64,
    ) -> Result<u64> {
        let mut reader = BitReader::new(&mut *source, self.config)?;
        let mut out = Vec::with_capacity(self.config.block_size);
        let root = tree.root();
        let mut node = root;
        let mut emitted = 0u64;

        while emitted < file_size {
            let Some(bit) = reader.read_bit()? else {
                // Deliver what was decoded before reporting the truncation.
                sink.write_all(&out)?;
                return Err(OxiHuffError::truncated_body(emitted, file_size));
            };

            match node.child(bit) {
                Some(Node::Leaf { symbol, .. }) => {
                    out.push(*symbol);
                    emitted += 1;
                    if out.len() == self.config.block_size {
                        sink.write_all(&out)?;
                        out.clear();
                    }
                    node = root;
                }
                Some(next) => node = next,
                None => return Err(OxiHuffError::malformed_tree(0, "root is a leaf")),
            }
        }

        sink.write_all(&out)?;
        Ok(reader.bytes_read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::HuffmanEncoder;
    use crate::header::MAGIC;
    use std::io::Cursor;

    fn encode(data: &[u8]) -> Vec<u8> {
        let encoder = HuffmanEncoder::new(HuffmanConfig::default()).unwrap();
        let mut out = Vec::new();
        encoder.encode(&mut Cursor::new(data), &mut out).unwrap();
        out
    }

    fn decode(stream: &[u8]) -> Result<Vec<u8>> {
        let decoder = HuffmanDecoder::new(HuffmanConfig::default())?;
        let mut out = Vec::new();
        decoder.decode(&mut Cursor::new(stream), &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_roundtrip() {
        let data = b"it was the best of times, it was the worst of times";
        assert_eq!(decode(&encode(data)).unwrap(), data);
    }

    #[test]
    fn test_empty() {
        let stream = encode(b"");
        let decoder = HuffmanDecoder::new(HuffmanConfig::default()).unwrap();
        let mut out = Vec::new();
        let report = decoder.decode(&mut Cursor::new(&stream), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(report.stats.bytes_read, stream.len() as u64);
    }

    #[test]
    fn test_block_sizes_interchangeable() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 13 + i % 7) as u8).collect();
        let encoder = HuffmanEncoder::new(HuffmanConfig::new(3)).unwrap();
        let mut stream = Vec::new();
        encoder.encode(&mut Cursor::new(&data), &mut stream).unwrap();

        for block_size in [1, 7, 64, 4096] {
            let decoder = HuffmanDecoder::new(HuffmanConfig::new(block_size)).unwrap();
            let mut out = Vec::new();
            decoder.decode(&mut Cursor::new(&stream), &mut out).unwrap();
            assert_eq!(out, data, "block size {block_size}");
        }
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let data = b"mississippi";
        let mut stream = encode(data);
        stream.extend_from_slice(b"garbage");
        assert_eq!(decode(&stream).unwrap(), data);
    }

    #[test]
    fn test_trailing_bytes_not_counted() {
        let stream = encode(b"hello hello hello");
        let mut padded = stream.clone();
        padded.extend_from_slice(&[0u8; 1000]);

        for block_size in [1, 16, 4096] {
            let decoder = HuffmanDecoder::new(HuffmanConfig::new(block_size)).unwrap();
            let mut out = Vec::new();
            let report = decoder.decode(&mut Cursor::new(&padded), &mut out).unwrap();
            assert_eq!(out, b"hello hello hello");
            assert_eq!(report.stats.bytes_read, stream.len() as u64, "block size {block_size}");
        }
    }

    #[test]
    fn test_bad_magic() {
        let mut stream = encode(b"hello");
        stream[3] = 0;
        let err = decode(&stream).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::InvalidMagic {
                expected: MAGIC,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_body() {
        let data = vec![b'x'; 100].into_iter().chain(*b"yz").collect::<Vec<u8>>();
        let stream = encode(&data);
        let err = decode(&stream[..stream.len() - 2]).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::TruncatedBody { expected: 102, .. }
        ));
    }

    #[test]
    fn test_truncated_tree() {
        let stream = encode(b"hello");
        let err = decode(&stream[..HEADER_SIZE + 3]).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::UnexpectedEof {
                section: "tree",
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_tree() {
        let mut stream = encode(b"hello");
        // Replace the final internal tag of the dump.
        let tree_end = HEADER_SIZE + usize::from(u16::from_le_bytes([stream[6], stream[7]]));
        stream[tree_end - 1] = b'?';
        let err = decode(&stream).unwrap_err();
        assert!(matches!(err, OxiHuffError::MalformedTree { .. }));
    }

    #[test]
    fn test_invalid_tree_size() {
        let mut stream = encode(b"hello");
        stream[6] = 4;
        stream[7] = 0;
        let err = decode(&stream).unwrap_err();
        assert!(matches!(err, OxiHuffError::InvalidHeader { .. }));
    }

    #[test]
    fn test_read_preamble() {
        let stream = encode(b"abbbbccddeeeef");
        let decoder = HuffmanDecoder::new(HuffmanConfig::default()).unwrap();
        let mut cursor = Cursor::new(&stream);
        let (header, tree) = decoder.read_preamble(&mut cursor).unwrap();
        assert_eq!(header.file_size, 14);
        assert_eq!(tree.leaf_count(), 6);
        assert_eq!(cursor.position(), (HEADER_SIZE + 17) as u64);
    }
}
