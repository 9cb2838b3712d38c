//! Per-session byte accounting.

use serde::Serialize;

/// Byte counts gathered during one encode or decode session.
///
/// For compression, `bytes_read` is the size of the source and
/// `bytes_written` covers header, tree and body. For decompression the
/// roles swap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Bytes consumed from the byte source.
    pub bytes_read: u64,
    /// Bytes handed to the byte sink.
    pub bytes_written: u64,
    /// Number of symbols encoded or decoded.
    pub symbols: u64,
}

impl SessionStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the uncompressed side of the session.
    ///
    /// `compressing` selects which counter holds the uncompressed data.
    pub fn uncompressed_size(&self, compressing: bool) -> u64 {
        if compressing {
            self.bytes_read
        } else {
            self.bytes_written
        }
    }

    /// Size of the compressed side of the session.
    pub fn compressed_size(&self, compressing: bool) -> u64 {
        if compressing {
            self.bytes_written
        } else {
            self.bytes_read
        }
    }

    /// Percentage of space saved, `100 * (1 - compressed / uncompressed)`.
    ///
    /// Returns `0.0` when the uncompressed side is empty.
    pub fn space_saving(&self, compressing: bool) -> f64 {
        let uncompressed = self.uncompressed_size(compressing);
        if uncompressed == 0 {
            return 0.0;
        }
        100.0 * (1.0 - self.ratio(compressing))
    }

    /// Compressed size divided by uncompressed size.
    pub fn ratio(&self, compressing: bool) -> f64 {
        let uncompressed = self.uncompressed_size(compressing);
        if uncompressed == 0 {
            return 0.0;
        }
        self.compressed_size(compressing) as f64 / uncompressed as f64
    }
}
