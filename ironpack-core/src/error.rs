//! Error types for IronPack operations.
//!
//! One error enum covers the whole stack: bit-stream truncation, DEFLATE
//! block and code failures, and gzip container validation. Decoders attach
//! positions (bit or byte offsets) where they are known, so a corrupted
//! stream can be pinpointed without re-parsing.

use std::io;
use thiserror::Error;

/// The main error type for IronPack operations.
#[derive(Debug, Error)]
pub enum IronPackError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in the gzip member header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Unsupported compression method in the gzip member header.
    #[error("Unsupported compression method {method} (expected 8, DEFLATE)")]
    UnsupportedMethod {
        /// The CM byte that was read.
        method: u8,
    },

    /// DEFLATE block type that is recognized but not implemented.
    #[error("Unsupported DEFLATE block type {btype}")]
    UnsupportedBlockType {
        /// The BTYPE field that was read.
        btype: u8,
    },

    /// Malformed DEFLATE block header.
    #[error("Invalid block header: {message}")]
    InvalidBlockHeader {
        /// Description of the header error.
        message: String,
    },

    /// Invalid Huffman code encountered during decompression.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// The compressed stream ended mid-symbol or mid-field.
    #[error("Truncated stream: expected {expected} more bytes")]
    TruncatedStream {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// A back-reference distance that reaches before the produced output.
    #[error("Invalid back-reference distance: {distance} exceeds history size {available}")]
    InvalidDistance {
        /// The invalid distance value.
        distance: usize,
        /// Bytes of history available at that point.
        available: usize,
    },

    /// CRC checksum mismatch in the gzip trailer.
    #[error("CRC mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        /// Expected CRC value from the trailer.
        expected: u32,
        /// Computed CRC value from the decoded data.
        computed: u32,
    },

    /// Decoded size disagrees with the ISIZE field in the gzip trailer.
    #[error("Size mismatch: trailer says {expected} bytes, decoded {actual}")]
    SizeMismatch {
        /// ISIZE value from the trailer.
        expected: u32,
        /// Decoded length modulo 2^32.
        actual: u32,
    },
}

/// Result type alias for IronPack operations.
pub type Result<T> = std::result::Result<T, IronPackError>;

impl IronPackError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported method error.
    pub fn unsupported_method(method: u8) -> Self {
        Self::UnsupportedMethod { method }
    }

    /// Create an unsupported block type error.
    pub fn unsupported_block_type(btype: u8) -> Self {
        Self::UnsupportedBlockType { btype }
    }

    /// Create an invalid block header error.
    pub fn invalid_block_header(message: impl Into<String>) -> Self {
        Self::InvalidBlockHeader {
            message: message.into(),
        }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create a truncated stream error.
    pub fn truncated(expected: usize) -> Self {
        Self::TruncatedStream { expected }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, available: usize) -> Self {
        Self::InvalidDistance {
            distance,
            available,
        }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create a size mismatch error.
    pub fn size_mismatch(expected: u32, actual: u32) -> Self {
        Self::SizeMismatch { expected, actual }
    }
}
