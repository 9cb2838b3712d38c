//! Error types for OxiHuff operations.
//!
//! Every failure inside an encode or decode session is reported through
//! [`OxiHuffError`]. Errors are grouped into the coarse [`ErrorKind`]
//! classes so callers can map them to messages and exit codes without
//! matching on every variant.

use std::io;
use thiserror::Error;

/// Coarse classification of an [`OxiHuffError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The compressed stream is malformed or truncated.
    Format,
    /// A fixed-capacity container or code buffer was overrun.
    Capacity,
    /// The byte source or sink failed.
    Io,
    /// The caller supplied an invalid configuration.
    Config,
}

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in the stream header.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Expected magic value.
        expected: u32,
        /// Magic value found in the stream.
        found: u32,
    },

    /// The serialized tree could not be rebuilt.
    #[error("Malformed tree dump at byte {offset}: {message}")]
    MalformedTree {
        /// Offset into the tree dump where the problem was detected.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// The body ended before every symbol was decoded.
    #[error("Truncated body: decoded {decoded} of {expected} symbols")]
    TruncatedBody {
        /// Symbols emitted before the stream ran out.
        decoded: u64,
        /// Symbols announced in the header.
        expected: u64,
    },

    /// Unexpected end of file while reading a fixed-size section.
    #[error("Unexpected end of file while reading {section}: expected {expected} bytes, got {found}")]
    UnexpectedEof {
        /// Name of the section being read.
        section: &'static str,
        /// Bytes required.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },

    /// Invalid header field.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// The source produced different data on the encoding pass than on the scan pass.
    #[error("Source changed between passes: {message}")]
    SourceChanged {
        /// Description of the mismatch.
        message: String,
    },

    /// A code grew past the maximum representable length.
    #[error("Code too long: exceeds {max_bits} bits")]
    CodeTooLong {
        /// Maximum number of bits a code can hold.
        max_bits: usize,
    },

    /// A bounded container was asked to hold more than its capacity.
    #[error("{container} is full (capacity {capacity})")]
    CapacityExceeded {
        /// Name of the container.
        container: &'static str,
        /// Fixed capacity of the container.
        capacity: usize,
    },

    /// A bounded container was asked for an element while empty.
    #[error("{container} is empty")]
    Underflow {
        /// Name of the container.
        container: &'static str,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create a malformed tree error.
    pub fn malformed_tree(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedTree {
            offset,
            message: message.into(),
        }
    }

    /// Create a truncated body error.
    pub fn truncated_body(decoded: u64, expected: u64) -> Self {
        Self::TruncatedBody { decoded, expected }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(section: &'static str, expected: usize, found: usize) -> Self {
        Self::UnexpectedEof {
            section,
            expected,
            found,
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a source changed error.
    pub fn source_changed(message: impl Into<String>) -> Self {
        Self::SourceChanged {
            message: message.into(),
        }
    }

    /// Create a code too long error.
    pub fn code_too_long(max_bits: usize) -> Self {
        Self::CodeTooLong { max_bits }
    }

    /// Create a capacity exceeded error.
    pub fn capacity_exceeded(container: &'static str, capacity: usize) -> Self {
        Self::CapacityExceeded {
            container,
            capacity,
        }
    }

    /// Create an underflow error.
    pub fn underflow(container: &'static str) -> Self {
        Self::Underflow { container }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidMagic { .. }
            | Self::MalformedTree { .. }
            | Self::TruncatedBody { .. }
            | Self::UnexpectedEof { .. }
            | Self::InvalidHeader { .. }
            | Self::SourceChanged { .. } => ErrorKind::Format,
            Self::CodeTooLong { .. } | Self::CapacityExceeded { .. } | Self::Underflow { .. } => {
                ErrorKind::Capacity
            }
            Self::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    /// Whether this error means the input stream is not valid OxiHuff data.
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}
