//! # IronPack Deflate
//!
//! Pure Rust implementation of the DEFLATE compressed data format
//! (RFC 1951), the codec underlying gzip, ZIP and PNG.
//!
//! ## Features
//!
//! - **Compression**: LZ77 hash-chain matching + fixed Huffman codes
//!   (BTYPE=01), or stored blocks (BTYPE=00) at level 0
//! - **Decompression**: stored and fixed-Huffman blocks; dynamic-Huffman
//!   blocks are recognized and rejected with a distinct error
//!
//! ## Example
//!
//! ```rust
//! use ironpack_deflate::{deflate, inflate};
//!
//! let original = b"Hello, World! Hello, World!";
//! let compressed = deflate(original, 6).unwrap();
//!
//! let decompressed = inflate(&compressed).unwrap();
//! assert_eq!(&decompressed, original);
//! ```
//!
//! ## Compression Levels
//!
//! - Level 0: no compression (stored blocks)
//! - Levels 1-9: fixed-Huffman blocks; higher levels search the match
//!   window harder

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod deflate;
pub mod huffman;
pub mod inflate;
pub mod lz77;
pub mod tables;

// Re-exports
pub use deflate::{Deflater, deflate};
pub use huffman::{HuffmanBuilder, HuffmanTree, canonical_codes};
pub use inflate::{Inflater, inflate};
pub use lz77::{Lz77Encoder, Lz77Symbol};
