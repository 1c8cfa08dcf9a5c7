//! CRC-32 (ISO 3309) checksum, as used by the gzip trailer.
//!
//! - Polynomial: 0x04C11DB7 (reflected: 0xEDB88320)
//! - Initial value: 0xFFFFFFFF
//! - Final XOR: 0xFFFFFFFF
//! - Reflected input and output
//!
//! The 256-entry lookup table is built at compile time; the update loop
//! folds one byte at a time with `crc = (crc >> 8) ^ table[(crc ^ b) & 0xFF]`.

/// CRC-32 lookup table (polynomial 0xEDB88320, reflected).
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB88320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// Incremental CRC-32 calculator.
///
/// # Example
///
/// ```
/// use ironpack_core::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"Hello, World!");
/// assert_eq!(crc.finalize(), 0xEC4AC3D0);
/// ```
#[derive(Debug, Clone)]
pub struct Crc32 {
    crc: u32,
}

impl Crc32 {
    /// Create a new CRC-32 calculator.
    pub fn new() -> Self {
        Self { crc: 0xFFFFFFFF }
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = 0xFFFFFFFF;
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        let mut crc = self.crc;
        for &byte in data {
            let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
            crc = (crc >> 8) ^ CRC32_TABLE[index];
        }
        self.crc = crc;
    }

    /// Current CRC value without consuming the calculator.
    #[inline]
    pub fn value(&self) -> u32 {
        self.crc ^ 0xFFFFFFFF
    }

    /// Finalize and return the CRC value.
    #[inline]
    pub fn finalize(self) -> u32 {
        self.crc ^ 0xFFFFFFFF
    }

    /// Compute the CRC-32 of a slice in one call.
    #[inline]
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
