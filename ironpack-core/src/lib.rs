//! # IronPack Core
//!
//! Core components for the IronPack DEFLATE/gzip library.
//!
//! This crate provides the building blocks the codec and container layers
//! are made of:
//!
//! - [`bitstream`]: LSB-first bit-level I/O for variable-length codes
//! - [`crc`]: table-driven CRC-32 for the gzip trailer
//! - [`window`]: decoder output history for LZ77 back-references
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! IronPack is a layered stack:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ L4: CLI (ironpack-cli)                       │
//! ├──────────────────────────────────────────────┤
//! │ L3: Container (ironpack-gzip)                │
//! │     RFC 1952 member header/trailer           │
//! ├──────────────────────────────────────────────┤
//! │ L2: Codec (ironpack-deflate)                 │
//! │     LZ77 + canonical Huffman, RFC 1951       │
//! ├──────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                   │
//! │     BitReader/BitWriter, OutputWindow, CRC   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ironpack_core::bitstream::{BitReader, BitWriter};
//! use ironpack_core::crc::Crc32;
//! use std::io::Cursor;
//!
//! let data = vec![0xAB, 0xCD];
//! let mut reader = BitReader::new(Cursor::new(data));
//! let bits = reader.read_bits(12).unwrap();
//! assert_eq!(bits, 0xDAB);
//!
//! let crc = Crc32::compute(b"Hello, World!");
//! assert_eq!(crc, 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod crc;
pub mod error;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use crc::Crc32;
pub use error::{IronPackError, Result};
pub use window::OutputWindow;
