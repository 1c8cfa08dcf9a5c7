//! # IronPack Gzip
//!
//! gzip (RFC 1952) member support: a 10-byte header, a DEFLATE payload,
//! and an 8-byte trailer carrying the CRC-32 and length of the
//! uncompressed data.
//!
//! ## Example
//!
//! ```rust
//! use ironpack_gzip as gzip;
//!
//! let data = b"Hello, World!";
//! let compressed = gzip::compress(data, 6).unwrap();
//!
//! let mut reader = std::io::Cursor::new(compressed);
//! let decompressed = gzip::decompress(&mut reader).unwrap();
//! assert_eq!(decompressed, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod member;

pub use member::{
    CM_DEFLATE, GZIP_MAGIC, GzipHeader, GzipMember, compress, compress_with_filename, read_member,
    write_member,
};

use ironpack_core::error::Result;
use std::io::Read;

/// Decompress a gzip member, verifying its CRC-32 and ISIZE trailer.
pub fn decompress<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    Ok(read_member(reader)?.data)
}
