//! DEFLATE decompression (RFC 1951).
//!
//! The decoder is a small state machine over block headers:
//!
//! - BTYPE=00 (stored): byte-align, validate LEN against its one's
//!   complement, bulk-copy the payload.
//! - BTYPE=01 (fixed Huffman): decode literal/length symbols against the
//!   fixed tables until the end-of-block symbol.
//! - BTYPE=10 (dynamic Huffman): recognized and rejected.
//! - BTYPE=11: reserved, always an error.
//!
//! Blocks repeat until one with BFINAL set has been consumed; any bits
//! left in the final byte are ignored.

use crate::huffman::END_OF_BLOCK;
use crate::tables::{
    DISTANCE_EXTRA_BITS, LENGTH_EXTRA_BITS, decode_distance, decode_length, fixed_distance_tree,
    fixed_litlen_tree,
};
use ironpack_core::bitstream::BitReader;
use ironpack_core::error::{IronPackError, Result};
use ironpack_core::window::OutputWindow;
use std::io::Read;

/// DEFLATE decompressor.
#[derive(Debug, Default)]
pub struct Inflater {
    /// Output accumulator and back-reference history.
    output: OutputWindow,
}

impl Inflater {
    /// Create a new decompressor.
    pub fn new() -> Self {
        Self {
            output: OutputWindow::new(),
        }
    }

    /// Decompress a full DEFLATE stream from a reader.
    pub fn inflate_reader<R: Read>(&mut self, reader: &mut R) -> Result<Vec<u8>> {
        let mut bits = BitReader::new(reader);

        loop {
            let bfinal = bits.read_bit()?;
            let btype = bits.read_bits(2)? as u8;

            match btype {
                0b00 => self.inflate_stored(&mut bits)?,
                0b01 => self.inflate_fixed(&mut bits)?,
                0b10 => return Err(IronPackError::unsupported_block_type(btype)),
                _ => {
                    return Err(IronPackError::invalid_block_header(
                        "reserved block type 3",
                    ));
                }
            }

            if bfinal {
                break;
            }
        }

        Ok(std::mem::take(&mut self.output).into_output())
    }

    /// Decompress a stored (uncompressed) block.
    fn inflate_stored<R: Read>(&mut self, bits: &mut BitReader<R>) -> Result<()> {
        bits.align_to_byte();

        let len = bits.read_bits(16)? as u16;
        let nlen = bits.read_bits(16)? as u16;
        if len != !nlen {
            return Err(IronPackError::invalid_block_header(format!(
                "stored block LEN {:#06x} does not match NLEN complement {:#06x}",
                len, !nlen
            )));
        }

        let mut payload = vec![0u8; usize::from(len)];
        bits.read_bytes(&mut payload)?;
        self.output.write_literals(&payload);

        Ok(())
    }

    /// Decompress a fixed-Huffman block.
    fn inflate_fixed<R: Read>(&mut self, bits: &mut BitReader<R>) -> Result<()> {
        let litlen_tree = fixed_litlen_tree();
        let dist_tree = fixed_distance_tree();

        loop {
            let symbol = litlen_tree.decode(bits)?;

            if symbol < 256 {
                self.output.write_literal(symbol as u8);
            } else if symbol == END_OF_BLOCK {
                return Ok(());
            } else if symbol <= 285 {
                let extra_bits = LENGTH_EXTRA_BITS[usize::from(symbol - 257)];
                let extra = bits.read_bits(extra_bits)? as u16;
                let length = decode_length(symbol, extra);

                let dist_code = dist_tree.decode(bits)?;
                if dist_code >= 30 {
                    return Err(IronPackError::invalid_huffman(bits.bit_position()));
                }
                let dist_extra_bits = DISTANCE_EXTRA_BITS[usize::from(dist_code)];
                let dist_extra = bits.read_bits(dist_extra_bits)? as u16;
                let distance = decode_distance(dist_code, dist_extra);

                self.output
                    .copy_match(usize::from(distance), usize::from(length))?;
            } else {
                // 286 and 287 exist in the fixed table but are invalid.
                return Err(IronPackError::invalid_huffman(bits.bit_position()));
            }
        }
    }
}

/// Decompress a DEFLATE byte stream.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut cursor = std::io::Cursor::new(data);
    Inflater::new().inflate_reader(&mut cursor)
}
