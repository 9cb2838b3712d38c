//! Codec configuration.

use crate::error::{OxiHuffError, Result};

/// Largest block size accepted by [`HuffmanConfig::validate`].
pub const MAX_BLOCK_SIZE: usize = 1 << 20;

/// Configuration shared by the encoder and the decoder.
///
/// The block size only controls how the bit channel batches reads and
/// writes. It is not recorded in the stream, so data written with one
/// block size can be read back with any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Size in bytes of one I/O block.
    pub block_size: usize,
}

impl HuffmanConfig {
    /// Default configuration: 4 KiB blocks.
    pub const DEFAULT: Self = Self { block_size: 4096 };

    /// Small blocks, mostly useful for exercising block boundaries.
    pub const SMALL: Self = Self { block_size: 64 };

    /// Large blocks for bulk file processing.
    pub const LARGE: Self = Self {
        block_size: 64 * 1024,
    };

    /// Create a configuration with the given block size.
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(OxiHuffError::invalid_config("block size must be non-zero"));
        }
        if self.block_size > MAX_BLOCK_SIZE {
            return Err(OxiHuffError::invalid_config(format!(
                "block size {} exceeds maximum {}",
                self.block_size, MAX_BLOCK_SIZE
            )));
        }
        Ok(())
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
