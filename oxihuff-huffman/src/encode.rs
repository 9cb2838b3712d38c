//! Huffman encoder.

use crate::SessionReport;
use crate::code::CodeTable;
use crate::dump::dump;
use crate::frequency::FrequencyTable;
use crate::header::{HEADER_SIZE, Header};
use crate::tree::CodeTree;
use oxihuff_core::bitstream::BitWriter;
use oxihuff_core::config::HuffmanConfig;
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::stats::SessionStats;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::debug;

/// Two-pass Huffman encoder.
///
/// The first pass counts symbols, the second pass emits their codes. The
/// source therefore has to be seekable.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    config: HuffmanConfig,
    permissions: u16,
}

impl HuffmanEncoder {
    /// Create an encoder.
    pub fn new(config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            permissions: 0,
        })
    }

    /// Set the permission bits recorded in the header.
    pub fn with_permissions(mut self, permissions: u16) -> Self {
        self.permissions = permissions;
        self
    }

    /// Compress everything from the current position of `source` to its end.
    ///
    /// On success the sink holds a complete stream and has been flushed.
    /// If the source yields different data on the second pass the session
    /// fails with a source-changed error.
    pub fn encode<R, W>(&self, source: &mut R, sink: &mut W) -> Result<SessionReport>
    where
        R: Read + Seek,
        W: Write,
    {
        let start = source.stream_position()?;
        let (counts, file_size) = FrequencyTable::scan(source, self.config.block_size)?;
        let mut table = counts.clone();
        table.pad();

        let tree = CodeTree::build(&table)?;
        let codes = CodeTable::generate(&tree)?;
        // Padding symbols never occur in the body.
        let body_bits = codes.encoded_bits(&counts);
        let tree_bytes = dump(&tree);
        drop(tree);

        let tree_size = u16::try_from(tree_bytes.len()).map_err(|_| {
            OxiHuffError::invalid_header(format!("tree dump of {} bytes", tree_bytes.len()))
        })?;
        let header = Header::new(self.permissions, tree_size, file_size);
        debug!(
            permissions = header.permissions,
            tree_size = header.tree_size,
            file_size = header.file_size,
            leaves = codes.len(),
            body_bytes = body_bits.div_ceil(8),
            "writing header"
        );
        header.write(sink)?;
        sink.write_all(&tree_bytes)?;

        source.seek(SeekFrom::Start(start))?;
        let body_bytes = self.write_body(source, sink, &codes, file_size, body_bits)?;

        let stats = SessionStats {
            bytes_read: file_size,
            bytes_written: (HEADER_SIZE + tree_bytes.len()) as u64 + body_bytes,
            symbols: file_size,
        };
        debug!(
            bytes_read = stats.bytes_read,
            bytes_written = stats.bytes_written,
            "encode finished"
        );
        Ok(SessionReport { header, stats })
    }

    /// Second pass: emit the code of every source byte. Returns body bytes written.
    fn write_body<R: Read, W: Write>(
        &self,
        source: &mut R,
        sink: &mut W,
        codes: &CodeTable,
        file_size: u64,
        body_bits: u64,
    ) -> Result<u64> {
        let mut writer = BitWriter::new(&mut *sink, self.config)?;
        let mut buf = vec![0u8; self.config.block_size];
        let mut seen = 0u64;

        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            seen += n as u64;
            if seen > file_size {
                return Err(OxiHuffError::source_changed(format!(
                    "source grew past the {file_size} bytes counted on the first pass"
                )));
            }
            for &byte in &buf[..n] {
                let code = codes.get(byte).ok_or_else(|| {
                    OxiHuffError::source_changed(format!(
                        "byte {byte:#04x} was not seen on the first pass"
                    ))
                })?;
                writer.write_code(code.iter())?;
            }
        }

        if seen != file_size {
            return Err(OxiHuffError::source_changed(format!(
                "read {seen} bytes, expected {file_size}"
            )));
        }
        if writer.bits_written() != body_bits {
            return Err(OxiHuffError::source_changed(format!(
                "symbol counts differ from the first pass ({} body bits, expected {body_bits})",
                writer.bits_written()
            )));
        }

        writer.finalize()?;
        Ok(writer.bytes_written())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::MAGIC;
    use std::io::Cursor;

    fn encode(data: &[u8]) -> (Vec<u8>, SessionReport) {
        let encoder = HuffmanEncoder::new(HuffmanConfig::default()).unwrap();
        let mut out = Vec::new();
        let report = encoder.encode(&mut Cursor::new(data), &mut out).unwrap();
        (out, report)
    }

    #[test]
    fn test_empty_input() {
        let (out, report) = encode(b"");
        assert_eq!(report.header.file_size, 0);
        assert_eq!(report.header.magic, MAGIC);
        // Two padding leaves and no body.
        assert_eq!(report.header.tree_size, 5);
        assert_eq!(out.len(), HEADER_SIZE + 5);
        assert_eq!(&out[HEADER_SIZE..], b"L\x00L\x01I");
        assert_eq!(report.stats.bytes_written, out.len() as u64);
    }

    #[test]
    fn test_scenario_layout() {
        let data = b"abbbbccddeeeef";
        let (out, report) = encode(data);
        assert_eq!(report.header.file_size, 14);
        assert_eq!(report.header.tree_size, 17);
        assert_eq!(&out[HEADER_SIZE..HEADER_SIZE + 17], b"LaLfILbILeLcLdIII");

        // a, f: 3 bits once each; b, e: 2 bits four times; c, d: 3 bits twice.
        // 34 bits, padded to 5 bytes.
        assert_eq!(out.len(), HEADER_SIZE + 17 + 5);
        assert_eq!(report.stats.bytes_written, out.len() as u64);
        assert_eq!(report.stats.bytes_read, 14);
    }

    #[test]
    fn test_body_bits_lsb_first() {
        // 'a' = 000, 'b' = 01 in the scenario tree; "ab" leads with bits 0,0,0,0,1.
        let data = b"abbbbccddeeeef";
        let (out, _) = encode(data);
        let body = &out[HEADER_SIZE + 17..];
        assert_eq!(body[0] & 0b1_1111, 0b1_0000);
    }

    #[test]
    fn test_permissions_recorded() {
        let encoder = HuffmanEncoder::new(HuffmanConfig::SMALL)
            .unwrap()
            .with_permissions(0o600);
        let mut out = Vec::new();
        let report = encoder
            .encode(&mut Cursor::new(b"hello"), &mut out)
            .unwrap();
        assert_eq!(report.header.permissions, 0o600);
        assert_eq!(&out[4..6], &0o600u16.to_le_bytes());
    }

    #[test]
    fn test_encodes_from_current_position() {
        let mut source = Cursor::new(b"skipabab".to_vec());
        source.set_position(4);
        let encoder = HuffmanEncoder::new(HuffmanConfig::default()).unwrap();
        let mut out = Vec::new();
        let report = encoder.encode(&mut source, &mut out).unwrap();
        assert_eq!(report.header.file_size, 4);
        assert_eq!(report.header.tree_size, 5);
    }

    #[test]
    fn test_invalid_config() {
        assert!(HuffmanEncoder::new(HuffmanConfig::new(0)).is_err());
    }

    /// Returns different data on the second pass.
    struct Shifty {
        passes: usize,
        inner: Cursor<Vec<u8>>,
        second: Vec<u8>,
    }

    impl Read for Shifty {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Seek for Shifty {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.passes += 1;
            if self.passes > 1 {
                *self.inner.get_mut() = self.second.clone();
            }
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_source_changed() {
        let mut source = Shifty {
            passes: 0,
            inner: Cursor::new(b"aaa".to_vec()),
            second: b"xyz".to_vec(),
        };
        let encoder = HuffmanEncoder::new(HuffmanConfig::default()).unwrap();
        let err = encoder.encode(&mut source, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, OxiHuffError::SourceChanged { .. }));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_source_reshuffled_counts() {
        // Same length and alphabet, but the body needs more bits.
        let mut source = Shifty {
            passes: 0,
            inner: Cursor::new(b"aaaabbc".to_vec()),
            second: b"abbbbbc".to_vec(),
        };
        let encoder = HuffmanEncoder::new(HuffmanConfig::default()).unwrap();
        let err = encoder.encode(&mut source, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, OxiHuffError::SourceChanged { .. }));
    }

    #[test]
    fn test_body_size_matches_prediction() {
        let data = b"abbbbccddeeeef";
        let counts = FrequencyTable::from_bytes(data);
        let codes = CodeTable::generate(&CodeTree::build(&counts).unwrap()).unwrap();
        assert_eq!(codes.encoded_bits(&counts), 34);

        let (out, _) = encode(data);
        assert_eq!(out.len() as u64, (HEADER_SIZE + 17) as u64 + 34u64.div_ceil(8));
    }
}
