//! gzip member framing (RFC 1952 section 2.3).
//!
//! A member is a 10-byte fixed header, optional header fields selected by
//! the FLG byte, a DEFLATE payload, and an 8-byte trailer holding the
//! CRC-32 and length (mod 2^32) of the uncompressed data.
//!
//! The header is modeled by its semantic content: which optional fields
//! are present determines the FLG byte on write, and XFL is chosen from
//! the compression level. Raw wire bytes never outlive parsing.

use ironpack_core::Crc32;
use ironpack_core::error::{IronPackError, Result};
use ironpack_deflate::{deflate, inflate};
use std::io::{ErrorKind, Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// gzip magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// gzip compression method byte for DEFLATE.
pub const CM_DEFLATE: u8 = 8;

// FLG bits, RFC 1952 section 2.3.1.
const FTEXT: u8 = 0x01;
const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;

// XFL hints for the slowest and fastest settings.
const XFL_BEST: u8 = 2;
const XFL_FAST: u8 = 4;

/// Length of the fixed part of the header.
const FIXED_HEADER_LEN: usize = 10;

/// Length of the CRC-32/ISIZE trailer.
const TRAILER_LEN: usize = 8;

/// Metadata carried by a gzip member header.
#[derive(Debug, Clone)]
pub struct GzipHeader {
    /// Modification time (Unix timestamp, 0 = unavailable).
    pub mtime: u32,
    /// Originating operating system (3 = Unix, 255 = unknown).
    pub os: u8,
    /// Original filename, if recorded.
    pub filename: Option<String>,
    /// Free-form comment, if recorded.
    pub comment: Option<String>,
    /// Hint that the payload is text.
    pub is_text: bool,
}

impl Default for GzipHeader {
    fn default() -> Self {
        Self {
            mtime: 0,
            os: 255,
            filename: None,
            comment: None,
            is_text: false,
        }
    }
}

impl GzipHeader {
    /// A header with no optional fields and an unknown OS.
    pub fn new() -> Self {
        Self::default()
    }

    /// A header recording the original filename.
    pub fn named(filename: &str) -> Self {
        Self {
            filename: Some(filename.to_string()),
            ..Self::default()
        }
    }

    /// Set the modification time from the current clock.
    pub fn touch(&mut self) {
        self.mtime = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
    }

    /// Derive the FLG byte from the fields that are present.
    fn flag_byte(&self) -> u8 {
        let mut flg = 0;
        if self.is_text {
            flg |= FTEXT;
        }
        if self.filename.is_some() {
            flg |= FNAME;
        }
        if self.comment.is_some() {
            flg |= FCOMMENT;
        }
        flg
    }

    /// Serialize the header, fixed part first, then optional fields in
    /// FLG-bit order.
    fn write_to<W: Write>(&self, writer: &mut W, xfl: u8) -> Result<()> {
        let mut fixed = [0u8; FIXED_HEADER_LEN];
        fixed[..2].copy_from_slice(&GZIP_MAGIC);
        fixed[2] = CM_DEFLATE;
        fixed[3] = self.flag_byte();
        fixed[4..8].copy_from_slice(&self.mtime.to_le_bytes());
        fixed[8] = xfl;
        fixed[9] = self.os;
        writer.write_all(&fixed)?;

        if let Some(name) = &self.filename {
            writer.write_all(name.as_bytes())?;
            writer.write_all(&[0])?;
        }
        if let Some(comment) = &self.comment {
            writer.write_all(comment.as_bytes())?;
            writer.write_all(&[0])?;
        }

        Ok(())
    }

    /// Parse a member header, consuming every optional field FLG names.
    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut fixed = [0u8; FIXED_HEADER_LEN];
        read_exact_or_truncated(reader, &mut fixed)?;

        if fixed[..2] != GZIP_MAGIC {
            return Err(IronPackError::invalid_magic(
                GZIP_MAGIC.to_vec(),
                fixed[..2].to_vec(),
            ));
        }
        if fixed[2] != CM_DEFLATE {
            return Err(IronPackError::unsupported_method(fixed[2]));
        }

        let flg = fixed[3];
        let mtime = le_u32(&fixed[4..8]);
        // fixed[8] is the advisory XFL hint; nothing depends on it.
        let os = fixed[9];

        if flg & FEXTRA != 0 {
            let mut xlen = [0u8; 2];
            read_exact_or_truncated(reader, &mut xlen)?;
            let mut extra = vec![0u8; usize::from(u16::from_le_bytes(xlen))];
            read_exact_or_truncated(reader, &mut extra)?;
        }

        let filename = (flg & FNAME != 0).then(|| read_cstring(reader)).transpose()?;
        let comment = (flg & FCOMMENT != 0)
            .then(|| read_cstring(reader))
            .transpose()?;

        if flg & FHCRC != 0 {
            let mut crc16 = [0u8; 2];
            read_exact_or_truncated(reader, &mut crc16)?;
        }

        Ok(Self {
            mtime,
            os,
            filename,
            comment,
            is_text: flg & FTEXT != 0,
        })
    }
}

/// A fully decoded gzip member.
#[derive(Debug)]
pub struct GzipMember {
    /// Parsed header metadata.
    pub header: GzipHeader,
    /// Verified uncompressed payload.
    pub data: Vec<u8>,
}

/// Read one gzip member, inflate it, and verify the trailer.
pub fn read_member<R: Read>(reader: &mut R) -> Result<GzipMember> {
    let header = GzipHeader::read_from(reader)?;

    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    let Some(payload_len) = body.len().checked_sub(TRAILER_LEN) else {
        return Err(IronPackError::truncated(TRAILER_LEN - body.len()));
    };

    let (payload, trailer) = body.split_at(payload_len);
    let data = inflate(payload)?;

    let stored_crc = le_u32(&trailer[..4]);
    let computed_crc = Crc32::compute(&data);
    if computed_crc != stored_crc {
        return Err(IronPackError::crc_mismatch(stored_crc, computed_crc));
    }

    // ISIZE is the uncompressed length modulo 2^32.
    let stored_size = le_u32(&trailer[4..]);
    if data.len() as u32 != stored_size {
        return Err(IronPackError::size_mismatch(stored_size, data.len() as u32));
    }

    Ok(GzipMember { header, data })
}

/// Write one complete gzip member: header, DEFLATE payload, trailer.
pub fn write_member<W: Write>(
    header: &GzipHeader,
    data: &[u8],
    level: u8,
    writer: &mut W,
) -> Result<()> {
    header.write_to(writer, xfl_for_level(level))?;
    writer.write_all(&deflate(data, level)?)?;

    let mut trailer = [0u8; TRAILER_LEN];
    trailer[..4].copy_from_slice(&Crc32::compute(data).to_le_bytes());
    trailer[4..].copy_from_slice(&(data.len() as u32).to_le_bytes());
    writer.write_all(&trailer)?;

    Ok(())
}

/// Compress data into an anonymous gzip member.
pub fn compress(data: &[u8], level: u8) -> Result<Vec<u8>> {
    let mut member = Vec::new();
    write_member(&GzipHeader::new(), data, level, &mut member)?;
    Ok(member)
}

/// Compress data into a gzip member recording the original filename and
/// the current time.
pub fn compress_with_filename(data: &[u8], filename: &str, level: u8) -> Result<Vec<u8>> {
    let mut header = GzipHeader::named(filename);
    header.touch();

    let mut member = Vec::new();
    write_member(&header, data, level, &mut member)?;
    Ok(member)
}

/// The XFL hint matching a compression level.
fn xfl_for_level(level: u8) -> u8 {
    match level {
        0 | 1 => XFL_FAST,
        9.. => XFL_BEST,
        _ => 0,
    }
}

fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// `read_exact` that reports EOF as a truncated stream.
fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => IronPackError::truncated(buf.len()),
        _ => IronPackError::Io(e),
    })
}

/// Read a zero-terminated header string (Latin-1 on the wire).
fn read_cstring<R: Read>(reader: &mut R) -> Result<String> {
    let mut raw = Vec::new();
    loop {
        let mut byte = [0u8; 1];
        read_exact_or_truncated(reader, &mut byte)?;
        match byte[0] {
            0 => return Ok(String::from_utf8_lossy(&raw).into_owned()),
            other => raw.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_gzip_magic() {
        assert_eq!(GZIP_MAGIC, [0x1F, 0x8B]);
    }

    #[test]
    fn test_header_default() {
        let header = GzipHeader::new();
        assert_eq!(header.mtime, 0);
        assert_eq!(header.os, 255);
        assert!(header.filename.is_none());
        assert!(header.comment.is_none());
        assert!(!header.is_text);
        assert_eq!(header.flag_byte(), 0);
    }

    #[test]
    fn test_named_header_sets_fname_bit() {
        let header = GzipHeader::named("test.txt");
        assert_eq!(header.filename.as_deref(), Some("test.txt"));
        assert_eq!(header.flag_byte(), FNAME);
    }

    #[test]
    fn test_member_layout() {
        let compressed = compress(b"", 6).unwrap();

        // 10-byte header, 2-byte empty fixed block, 8-byte trailer.
        assert_eq!(&compressed[0..4], &[0x1F, 0x8B, 0x08, 0x00]);
        assert_eq!(compressed.len(), 20);

        // crc32("") == 0 and ISIZE == 0.
        assert_eq!(&compressed[compressed.len() - 8..], &[0u8; 8]);
    }

    #[test]
    fn test_roundtrip() {
        let original = b"Hello, gzip world! This is a test of compression.";

        let compressed = compress(original, 6).unwrap();
        let member = read_member(&mut Cursor::new(compressed)).unwrap();

        assert_eq!(member.data, original);
        assert!(member.header.filename.is_none());
    }

    #[test]
    fn test_roundtrip_empty() {
        let compressed = compress(b"", 6).unwrap();
        let member = read_member(&mut Cursor::new(compressed)).unwrap();
        assert!(member.data.is_empty());
    }

    #[test]
    fn test_roundtrip_with_filename() {
        let original = b"test data with filename";

        let compressed = compress_with_filename(original, "data.txt", 6).unwrap();
        let member = read_member(&mut Cursor::new(compressed)).unwrap();

        assert_eq!(member.header.filename.as_deref(), Some("data.txt"));
        assert_eq!(member.data, original);
    }

    #[test]
    fn test_roundtrip_comment_and_text_flag() {
        let header = GzipHeader {
            comment: Some("hand-rolled".to_string()),
            is_text: true,
            ..GzipHeader::default()
        };

        let mut compressed = Vec::new();
        write_member(&header, b"plain text", 6, &mut compressed).unwrap();

        let member = read_member(&mut Cursor::new(compressed)).unwrap();
        assert_eq!(member.header.comment.as_deref(), Some("hand-rolled"));
        assert!(member.header.is_text);
        assert_eq!(member.data, b"plain text");
    }

    #[test]
    fn test_roundtrip_stored_level() {
        let original = b"stored, not compressed";
        let compressed = compress(original, 0).unwrap();

        let member = read_member(&mut Cursor::new(compressed)).unwrap();
        assert_eq!(member.data, original);
    }

    #[test]
    fn test_repeated_data_compresses() {
        let original = vec![b'A'; 10000];
        let compressed = compress(&original, 9).unwrap();

        assert!(compressed.len() < original.len() / 10);
        assert_eq!(read_member(&mut Cursor::new(compressed)).unwrap().data, original);
    }

    #[test]
    fn test_xfl_hint_tracks_level() {
        assert_eq!(compress(b"x", 1).unwrap()[8], XFL_FAST);
        assert_eq!(compress(b"x", 6).unwrap()[8], 0);
        assert_eq!(compress(b"x", 9).unwrap()[8], XFL_BEST);
    }

    #[test]
    fn test_trailer_of_300_zero_bytes() {
        let input = vec![0u8; 300];
        let compressed = compress(&input, 6).unwrap();

        let trailer = &compressed[compressed.len() - 8..];
        assert_eq!(le_u32(&trailer[..4]), 0x9D6CDF7E);
        assert_eq!(le_u32(&trailer[4..]), 300);
    }

    #[test]
    fn test_skips_extra_field_and_header_crc() {
        // Synthetic header exercising FEXTRA, FNAME and FHCRC together.
        let mut data = vec![
            0x1F, 0x8B, 0x08, FEXTRA | FNAME | FHCRC,
            0x00, 0x00, 0x00, 0x00, // MTIME
            0x00, 0x03, // XFL, OS=Unix
            0x03, 0x00, // XLEN=3
            0x01, 0x02, 0x03, // extra field payload
            b'a', 0x00, // filename "a"
            0xAB, 0xCD, // header CRC16 (not verified)
        ];
        data.extend_from_slice(&[0x03, 0x00]); // empty fixed block
        data.extend_from_slice(&[0u8; 8]); // trailer: crc 0, isize 0

        let member = read_member(&mut Cursor::new(data)).unwrap();
        assert_eq!(member.header.filename.as_deref(), Some("a"));
        assert_eq!(member.header.os, 3);
        assert!(member.data.is_empty());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut data = compress(b"x", 6).unwrap();
        data[0] = 0x50;

        let err = read_member(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, IronPackError::InvalidMagic { .. }));
    }

    #[test]
    fn test_wrong_method_rejected() {
        let mut data = compress(b"x", 6).unwrap();
        data[2] = 7;

        let err = read_member(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, IronPackError::UnsupportedMethod { method: 7 }));
    }

    #[test]
    fn test_truncated_header_rejected() {
        let err = read_member(&mut Cursor::new(vec![0x1F, 0x8B, 0x08])).unwrap_err();
        assert!(matches!(err, IronPackError::TruncatedStream { .. }));
    }

    #[test]
    fn test_corrupted_crc_rejected() {
        let mut data = compress(b"check me", 6).unwrap();
        let n = data.len();
        data[n - 8] ^= 0xFF;

        let err = read_member(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, IronPackError::CrcMismatch { .. }));
    }

    #[test]
    fn test_corrupted_isize_rejected() {
        let mut data = compress(b"check me", 6).unwrap();
        let n = data.len();
        data[n - 1] ^= 0xFF;

        let err = read_member(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, IronPackError::SizeMismatch { .. }));
    }

    #[test]
    fn test_missing_trailer_rejected() {
        let data = compress(b"short", 6).unwrap();
        let cut = data[..data.len() - 5].to_vec();

        assert!(read_member(&mut Cursor::new(cut)).is_err());
    }
}
