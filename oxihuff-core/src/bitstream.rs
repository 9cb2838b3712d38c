//! Block-buffered bit-level I/O.
//!
//! This module provides [`BitWriter`] and [`BitReader`], the two halves of
//! the bit channel used by the Huffman body. Both exchange data with the
//! underlying sink/source one fixed-size block at a time; the block size
//! comes from [`HuffmanConfig`].
//!
//! # Bit Ordering
//!
//! Bits are packed LSB-first within each byte: the first bit written lands
//! in bit 0 of byte 0, the ninth bit in bit 0 of byte 1, and so on.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use oxihuff_core::HuffmanConfig;
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! let mut writer = BitWriter::new(&mut output, HuffmanConfig::DEFAULT).unwrap();
//! writer.write_code([true, false, true]).unwrap();
//! writer.finalize().unwrap();
//! assert_eq!(output, vec![0b101]);
//!
//! let mut reader = BitReader::new(Cursor::new(output), HuffmanConfig::DEFAULT).unwrap();
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! assert_eq!(reader.read_bit().unwrap(), Some(false));
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! ```

use crate::config::HuffmanConfig;
use crate::error::Result;
use std::io::{self, Read, Write};
use tracing::trace;

/// A bit-level writer that emits whole blocks to any `Write` implementation.
///
/// Bits accumulate in a block buffer. Each time the buffer fills up it is
/// written with a single `write_all`. [`finalize`](BitWriter::finalize)
/// must be called once after the last code to emit the partial block;
/// dropping the writer discards unflushed bits.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Block buffer.
    block: Vec<u8>,
    /// Bit cursor within the current block.
    bit_index: usize,
    /// Total bits written over the session.
    total_bits_written: u64,
    /// Total bytes handed to the writer.
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W, config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            writer,
            block: vec![0u8; config.block_size],
            bit_index: 0,
            total_bits_written: 0,
            bytes_written: 0,
        })
    }

    /// Total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Total number of bytes handed to the underlying writer.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Write the full block and reset the in-block cursor.
    fn flush_block(&mut self) -> Result<()> {
        self.writer.write_all(&self.block)?;
        self.bytes_written += self.block.len() as u64;
        trace!(bytes = self.block.len(), "flushed full block");
        self.block.fill(0);
        self.bit_index = 0;
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.block[self.bit_index / 8] |= (bit as u8) << (self.bit_index % 8);
        self.bit_index += 1;
        self.total_bits_written += 1;

        if self.bit_index == self.block.len() * 8 {
            self.flush_block()?;
        }
        Ok(())
    }

    /// Append every bit of a code, in order.
    pub fn write_code<I>(&mut self, bits: I) -> Result<()>
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value`, least significant bit first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");
        for i in 0..count {
            self.write_bit((value >> i) & 1 != 0)?;
        }
        Ok(())
    }

    /// Emit the partial block and flush the underlying writer.
    ///
    /// The last partial byte is padded with zero bits. Only the occupied
    /// bytes are written. The in-block cursor is reset afterwards, so the
    /// writer could start a fresh body.
    pub fn finalize(&mut self) -> Result<()> {
        let used = self.bit_index.div_ceil(8);
        if used > 0 {
            self.writer.write_all(&self.block[..used])?;
            self.bytes_written += used as u64;
            trace!(bytes = used, "flushed final partial block");
        }
        self.block.fill(0);
        self.bit_index = 0;
        self.writer.flush()?;
        Ok(())
    }
}

/// A bit-level reader that pulls whole blocks from any `Read` implementation.
///
/// Blocks are read lazily, only when the previous one has been consumed.
/// End of stream is reported as `Ok(None)` from
/// [`read_bit`](BitReader::read_bit), not as an error.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Block buffer.
    block: Vec<u8>,
    /// Valid bytes in the block buffer.
    filled: usize,
    /// Bit cursor within the current block.
    bit_index: usize,
    /// Set once the reader returned zero bytes.
    exhausted: bool,
    /// Total bits read over the session.
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R, config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            block: vec![0u8; config.block_size],
            filled: 0,
            bit_index: 0,
            exhausted: false,
            total_bits_read: 0,
        })
    }

    /// Total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Bytes consumed so far: bits read, rounded up to whole bytes.
    ///
    /// Bytes buffered from the source but not yet reached are not counted.
    pub fn bytes_read(&self) -> u64 {
        self.total_bits_read.div_ceil(8)
    }

    /// Read the next block, retrying short reads until it is full or the
    /// reader is exhausted. Returns the number of bytes placed in the block.
    fn fill_block(&mut self) -> Result<usize> {
        let mut filled = 0;
        while filled < self.block.len() {
            match self.reader.read(&mut self.block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.filled = filled;
        self.bit_index = 0;
        trace!(bytes = filled, "filled block");
        Ok(filled)
    }

    /// Read a single bit, or `None` at end of stream.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bit_index == self.filled * 8 {
            if self.exhausted {
                return Ok(None);
            }
            if self.fill_block()? == 0 {
                self.exhausted = true;
                return Ok(None);
            }
        }

        let byte = self.block[self.bit_index / 8];
        let bit = (byte >> (self.bit_index % 8)) & 1 != 0;
        self.bit_index += 1;
        self.total_bits_read += 1;
        Ok(Some(bit))
    }
}
