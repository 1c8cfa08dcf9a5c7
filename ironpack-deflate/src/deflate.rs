//! DEFLATE compression (RFC 1951).
//!
//! The writer produces one of two block shapes:
//!
//! - Level 0: stored blocks (BTYPE=00) with no compression, byte-aligned
//!   LEN/NLEN framing, capped at 65535 bytes per block.
//! - Levels 1-9: a single fixed-Huffman block (BFINAL=1, BTYPE=01)
//!   covering the whole input. The level tunes the LZ77 chain depth.
//!
//! Dynamic Huffman blocks (BTYPE=10) are not produced.

use crate::huffman::{canonical_codes, write_symbol, END_OF_BLOCK};
use crate::lz77::{Lz77Encoder, Lz77Symbol};
use crate::tables::{distance_to_code, fixed_litlen_lengths, length_to_code};
use ironpack_core::bitstream::BitWriter;
use ironpack_core::error::Result;
use std::io::Write;

/// Largest payload of a single stored block (16-bit LEN).
const MAX_STORED_BLOCK: usize = 65535;

/// DEFLATE compressor.
#[derive(Debug)]
pub struct Deflater {
    /// LZ77 matcher.
    lz77: Lz77Encoder,
    /// Compression level (0-9).
    level: u8,
}

impl Deflater {
    /// Create a compressor with the specified level (0-9).
    ///
    /// Level 0 stores without compressing; levels 1-9 trade matcher
    /// effort for ratio.
    pub fn new(level: u8) -> Self {
        let level = level.min(9);
        Self {
            lz77: Lz77Encoder::with_level(level),
            level,
        }
    }

    /// Reset internal state for a fresh input.
    pub fn reset(&mut self) {
        self.lz77.reset();
    }

    /// Compress `data` and write the DEFLATE stream to `writer`.
    pub fn deflate<W: Write>(&mut self, data: &[u8], writer: &mut W) -> Result<()> {
        let mut bits = BitWriter::new(writer);

        if self.level == 0 {
            self.write_stored_blocks(data, &mut bits)?;
        } else {
            self.write_fixed_block(data, &mut bits)?;
        }

        bits.flush()
    }

    /// Compress `data` into a fresh byte vector.
    pub fn compress_to_vec(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.deflate(data, &mut output)?;
        Ok(output)
    }

    /// Write stored (uncompressed) blocks.
    fn write_stored_blocks<W: Write>(&self, data: &[u8], bits: &mut BitWriter<W>) -> Result<()> {
        let mut chunks = data.chunks(MAX_STORED_BLOCK).peekable();

        // An empty input still needs one (empty) final block.
        if chunks.peek().is_none() {
            bits.write_bit(true)?; // BFINAL=1
            bits.write_bits(0b00, 2)?; // BTYPE=00
            bits.align_to_byte()?;
            bits.write_bits(0, 16)?; // LEN=0
            bits.write_bits(0xFFFF, 16)?; // NLEN
            return Ok(());
        }

        while let Some(chunk) = chunks.next() {
            let is_final = chunks.peek().is_none();

            bits.write_bit(is_final)?;
            bits.write_bits(0b00, 2)?;
            bits.align_to_byte()?;

            let len = chunk.len() as u16;
            bits.write_bits(u32::from(len), 16)?;
            bits.write_bits(u32::from(!len), 16)?;
            bits.write_bytes(chunk)?;
        }

        Ok(())
    }

    /// Write the whole input as one final fixed-Huffman block.
    fn write_fixed_block<W: Write>(&mut self, data: &[u8], bits: &mut BitWriter<W>) -> Result<()> {
        let symbols = self.lz77.compress(data);

        bits.write_bit(true)?; // BFINAL=1
        bits.write_bits(0b01, 2)?; // BTYPE=01

        let litlen_lengths = fixed_litlen_lengths();
        let litlen_codes = canonical_codes(&litlen_lengths);

        for symbol in &symbols {
            match *symbol {
                Lz77Symbol::Literal(byte) => {
                    write_symbol(bits, &litlen_codes, &litlen_lengths, u16::from(byte))?;
                }
                Lz77Symbol::Reference { length, distance } => {
                    let (len_code, len_extra_bits, len_extra) = length_to_code(length);
                    write_symbol(bits, &litlen_codes, &litlen_lengths, len_code)?;
                    if len_extra_bits > 0 {
                        bits.write_bits(u32::from(len_extra), len_extra_bits)?;
                    }

                    // Fixed distance codes: 5 bits, code = symbol value.
                    let (dist_code, dist_extra_bits, dist_extra) = distance_to_code(distance);
                    bits.write_code(u32::from(dist_code), 5)?;
                    if dist_extra_bits > 0 {
                        bits.write_bits(u32::from(dist_extra), dist_extra_bits)?;
                    }
                }
                Lz77Symbol::EndOfBlock => {
                    write_symbol(bits, &litlen_codes, &litlen_lengths, END_OF_BLOCK)?;
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Default for Deflater {
    fn default() -> Self {
        Self::new(6)
    }
}

/// Compress data with DEFLATE at the given level (0-9).
pub fn deflate(data: &[u8], level: u8) -> Result<Vec<u8>> {
    Deflater::new(level).compress_to_vec(data)
}
