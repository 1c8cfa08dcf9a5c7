//! Length/distance code tables for DEFLATE (RFC 1951 Section 3.2.5) and
//! the fixed Huffman code of Section 3.2.6.
//!
//! Raw match lengths (3-258) and distances (1-32768) are not Huffman-coded
//! directly. Each maps to a base code plus a run of extra bits:
//! the code is Huffman-coded, the extra bits are written verbatim and
//! select the exact value within the code's range.

use crate::huffman::HuffmanTree;
use std::sync::OnceLock;

/// Base length for each length code 257-285.
///
/// Code 285 is the special case: length 258 with no extra bits.
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, // 257-264: 0 extra bits
    11, 13, 15, 17, // 265-268: 1 extra bit
    19, 23, 27, 31, // 269-272: 2 extra bits
    35, 43, 51, 59, // 273-276: 3 extra bits
    67, 83, 99, 115, // 277-280: 4 extra bits
    131, 163, 195, 227, // 281-284: 5 extra bits
    258, // 285: 0 extra bits
];

/// Number of extra bits for length codes 257-285.
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, // 257-264
    1, 1, 1, 1, // 265-268
    2, 2, 2, 2, // 269-272
    3, 3, 3, 3, // 273-276
    4, 4, 4, 4, // 277-280
    5, 5, 5, 5, // 281-284
    0, // 285
];

/// Base distance for each distance code 0-29.
pub const DISTANCE_BASE: [u16; 30] = [
    1, 2, 3, 4, // 0-3: 0 extra bits
    5, 7, // 4-5: 1 extra bit
    9, 13, // 6-7: 2 extra bits
    17, 25, // 8-9: 3 extra bits
    33, 49, // 10-11: 4 extra bits
    65, 97, // 12-13: 5 extra bits
    129, 193, // 14-15: 6 extra bits
    257, 385, // 16-17: 7 extra bits
    513, 769, // 18-19: 8 extra bits
    1025, 1537, // 20-21: 9 extra bits
    2049, 3073, // 22-23: 10 extra bits
    4097, 6145, // 24-25: 11 extra bits
    8193, 12289, // 26-27: 12 extra bits
    16385, 24577, // 28-29: 13 extra bits
];

/// Number of extra bits for distance codes 0-29.
pub const DISTANCE_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, // 0-3
    1, 1, // 4-5
    2, 2, // 6-7
    3, 3, // 8-9
    4, 4, // 10-11
    5, 5, // 12-13
    6, 6, // 14-15
    7, 7, // 16-17
    8, 8, // 18-19
    9, 9, // 20-21
    10, 10, // 22-23
    11, 11, // 24-25
    12, 12, // 26-27
    13, 13, // 28-29
];

/// Fixed literal/length code lengths (RFC 1951 Section 3.2.6).
///
/// - Symbols 0-143: 8 bits (codes 00110000-10111111)
/// - Symbols 144-255: 9 bits (codes 110010000-111111111)
/// - Symbols 256-279: 7 bits (codes 0000000-0010111)
/// - Symbols 280-287: 8 bits (codes 11000000-11000111)
pub fn fixed_litlen_lengths() -> [u8; 288] {
    let mut lengths = [8u8; 288];
    for len in lengths.iter_mut().take(256).skip(144) {
        *len = 9;
    }
    for len in lengths.iter_mut().take(280).skip(256) {
        *len = 7;
    }
    lengths
}

/// Fixed distance code lengths: all 30 symbols use 5 bits, and the
/// canonical code of each symbol is the symbol value itself.
pub fn fixed_distance_lengths() -> [u8; 30] {
    [5u8; 30]
}

/// The fixed literal/length decoder tree, built once and cached.
pub fn fixed_litlen_tree() -> &'static HuffmanTree {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();
    TREE.get_or_init(|| {
        HuffmanTree::from_code_lengths(&fixed_litlen_lengths())
            .expect("fixed literal/length tree construction cannot fail")
    })
}

/// The fixed distance decoder tree, built once and cached.
pub fn fixed_distance_tree() -> &'static HuffmanTree {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();
    TREE.get_or_init(|| {
        HuffmanTree::from_code_lengths(&fixed_distance_lengths())
            .expect("fixed distance tree construction cannot fail")
    })
}

/// Convert a raw length (3-258) to `(code, extra_bits, extra_val)`.
pub fn length_to_code(length: u16) -> (u16, u8, u16) {
    debug_assert!(
        (3..=258).contains(&length),
        "length out of range: {}",
        length
    );

    let length = usize::from(length);
    let code = match length {
        3..=10 => length - 3 + 257,
        11..=18 => (length - 11) / 2 + 265,
        19..=34 => (length - 19) / 4 + 269,
        35..=66 => (length - 35) / 8 + 273,
        67..=130 => (length - 67) / 16 + 277,
        131..=257 => (length - 131) / 32 + 281,
        _ => 285,
    };

    let base = usize::from(LENGTH_BASE[code - 257]);
    let extra_bits = LENGTH_EXTRA_BITS[code - 257];
    let extra_val = (length - base) as u16;

    (code as u16, extra_bits, extra_val)
}

/// Convert a raw distance (1-32768) to `(code, extra_bits, extra_val)`.
pub fn distance_to_code(distance: u16) -> (u16, u8, u16) {
    debug_assert!(distance >= 1, "distance out of range: {}", distance);

    let code = match distance {
        1..=4 => usize::from(distance) - 1,
        5..=6 => 4,
        7..=8 => 5,
        9..=12 => 6,
        13..=16 => 7,
        17..=24 => 8,
        25..=32 => 9,
        33..=48 => 10,
        49..=64 => 11,
        65..=96 => 12,
        97..=128 => 13,
        129..=192 => 14,
        193..=256 => 15,
        257..=384 => 16,
        385..=512 => 17,
        513..=768 => 18,
        769..=1024 => 19,
        1025..=1536 => 20,
        1537..=2048 => 21,
        2049..=3072 => 22,
        3073..=4096 => 23,
        4097..=6144 => 24,
        6145..=8192 => 25,
        8193..=12288 => 26,
        12289..=16384 => 27,
        16385..=24576 => 28,
        _ => 29, // 24577..=32768
    };

    let base = DISTANCE_BASE[code];
    let extra_bits = DISTANCE_EXTRA_BITS[code];
    let extra_val = distance - base;

    (code as u16, extra_bits, extra_val)
}

/// Recover a raw length from a length code (257-285) and its extra bits.
pub fn decode_length(code: u16, extra: u16) -> u16 {
    debug_assert!((257..=285).contains(&code), "invalid length code: {}", code);
    LENGTH_BASE[usize::from(code - 257)] + extra
}

/// Recover a raw distance from a distance code (0-29) and its extra bits.
pub fn decode_distance(code: u16, extra: u16) -> u16 {
    debug_assert!(code < 30, "invalid distance code: {}", code);
    DISTANCE_BASE[usize::from(code)] + extra
}
