//! Stream header parsing and writing.
//!
//! Layout (little-endian, 16 bytes):
//!
//! ```text
//! offset  size  field
//!      0     4  magic        0xBEEFD00D
//!      4     2  permissions  source mode bits
//!      6     2  tree_size    length of the tree dump that follows
//!      8     8  file_size    number of symbols in the body
//! ```

use crate::dump::{MAX_DUMP_SIZE, dump_size};
use oxihuff_core::error::{OxiHuffError, Result};
use serde::Serialize;
use std::io::{self, Read, Write};

/// Magic number at the start of every stream.
pub const MAGIC: u32 = 0xBEEF_D00D;

/// Size of the encoded header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Magic number.
    pub magic: u32,
    /// Permission bits of the source file. Passed through, never interpreted.
    pub permissions: u16,
    /// Length of the tree dump in bytes.
    pub tree_size: u16,
    /// Number of symbols encoded in the body.
    pub file_size: u64,
}

impl Header {
    /// Create a header with the standard magic.
    pub fn new(permissions: u16, tree_size: u16, file_size: u64) -> Self {
        Self {
            magic: MAGIC,
            permissions,
            tree_size,
            file_size,
        }
    }

    /// Number of leaves implied by `tree_size`.
    pub fn leaf_count(&self) -> usize {
        (usize::from(self.tree_size) + 1) / 3
    }

    /// Check that `tree_size` is the dump length of a tree with 2 to 256 leaves.
    pub fn validate(&self) -> Result<()> {
        let size = usize::from(self.tree_size);
        if size < dump_size(2) || size > MAX_DUMP_SIZE || (size + 1) % 3 != 0 {
            return Err(OxiHuffError::invalid_header(format!(
                "tree size {size} is not a valid dump length"
            )));
        }
        Ok(())
    }

    /// Encode to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.magic.to_le_bytes());
        buf[4..6].copy_from_slice(&self.permissions.to_le_bytes());
        buf[6..8].copy_from_slice(&self.tree_size.to_le_bytes());
        buf[8..16].copy_from_slice(&self.file_size.to_le_bytes());
        buf
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read a header from a reader.
    ///
    /// The magic number is read and checked on its own first, so a foreign
    /// stream is rejected after consuming only four bytes.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_section(reader, &mut magic, "header")?;
        let magic = u32::from_le_bytes(magic);
        if magic != MAGIC {
            return Err(OxiHuffError::invalid_magic(MAGIC, magic));
        }

        let mut rest = [0u8; HEADER_SIZE - 4];
        read_section(reader, &mut rest, "header").map_err(|e| match e {
            OxiHuffError::UnexpectedEof {
                section,
                expected,
                found,
            } => OxiHuffError::unexpected_eof(section, expected + 4, found + 4),
            other => other,
        })?;

        Ok(Self {
            magic,
            permissions: u16::from_le_bytes([rest[0], rest[1]]),
            tree_size: u16::from_le_bytes([rest[2], rest[3]]),
            file_size: u64::from_le_bytes([
                rest[4], rest[5], rest[6], rest[7], rest[8], rest[9], rest[10], rest[11],
            ]),
        })
    }
}

/// Fill `buf` completely, reporting a short read as an unexpected end of `section`.
pub(crate) fn read_section<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    section: &'static str,
) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Err(OxiHuffError::unexpected_eof(section, buf.len(), filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_layout() {
        let header = Header::new(0o644, 17, 14);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], &[0x0D, 0xD0, 0xEF, 0xBE]);
        assert_eq!(&bytes[4..6], &0o644u16.to_le_bytes());
        assert_eq!(&bytes[6..8], &[17, 0]);
        assert_eq!(&bytes[8..16], &[14, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_write_read() {
        let header = Header::new(0o755, 767, u64::MAX - 1);
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(Header::read(&mut Cursor::new(&buf)).unwrap(), header);
    }

    #[test]
    fn test_bad_magic_stops_after_four_bytes() {
        let mut bytes = Header::new(0, 5, 1).to_bytes().to_vec();
        bytes[0] ^= 0xFF;
        let mut cursor = Cursor::new(bytes);
        let err = Header::read(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::InvalidMagic {
                expected: MAGIC,
                ..
            }
        ));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_truncated_header() {
        let bytes = Header::new(0, 5, 1).to_bytes();
        let err = Header::read(&mut Cursor::new(&bytes[..10])).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::UnexpectedEof {
                section: "header",
                expected: 16,
                found: 10,
            }
        ));

        let err = Header::read(&mut Cursor::new(&bytes[..2])).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::UnexpectedEof {
                expected: 4,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_leaf_count() {
        assert_eq!(Header::new(0, 5, 0).leaf_count(), 2);
        assert_eq!(Header::new(0, 17, 0).leaf_count(), 6);
        assert_eq!(Header::new(0, 767, 0).leaf_count(), 256);
    }

    #[test]
    fn test_validate() {
        assert!(Header::new(0, 5, 0).validate().is_ok());
        assert!(Header::new(0, 767, 0).validate().is_ok());
        assert!(Header::new(0, 0, 0).validate().is_err());
        assert!(Header::new(0, 2, 0).validate().is_err());
        assert!(Header::new(0, 6, 0).validate().is_err());
        assert!(Header::new(0, 770, 0).validate().is_err());
    }
}
