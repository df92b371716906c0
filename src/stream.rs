//! Byte stream primitives for the binary form
//!
//! - Compressed integers: a header byte holding the number of magnitude
//!   bytes (bit 0x80 set for negatives), then the magnitude little-endian
//! - Strings: compressed byte length followed by UTF-8 bytes
//!
//! Implemented as extension traits over `std::io::Read` / `std::io::Write`.

use crate::error::{DecodeError, DecodeResult};
use std::io::{self, Read, Write};

/// Largest magnitude width accepted in a compressed integer header
const MAX_COMPRESSED_BYTES: u8 = 8;

pub trait WriteExt: Write {
    fn write_compressed_int(&mut self, value: i64) -> io::Result<()> {
        let mut magnitude = value.unsigned_abs();
        let mut data = [0u8; 9];
        let mut num = 0usize;

        while magnitude > 0 {
            num += 1;
            data[num] = magnitude as u8;
            magnitude >>= 8;
        }

        data[0] = num as u8;
        if value < 0 {
            data[0] |= 0x80;
        }

        self.write_all(&data[..=num])
    }

    fn write_len(&mut self, len: usize) -> io::Result<()> {
        let len = i64::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length overflows i64"))?;
        self.write_compressed_int(len)
    }

    fn write_string(&mut self, s: &str) -> io::Result<()> {
        self.write_len(s.len())?;
        self.write_all(s.as_bytes())
    }
}

impl<W: Write + ?Sized> WriteExt for W {}

pub trait ReadExt: Read {
    /// Read one byte, or `None` at a clean end of stream
    fn read_byte_opt(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_byte(&mut self) -> DecodeResult<u8> {
        self.read_byte_opt()?.ok_or(DecodeError::TruncatedStream)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read exactly `len` bytes without trusting `len` for the allocation
    fn read_bytes(&mut self, len: usize) -> DecodeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(64 * 1024));
        Read::take(&mut *self, len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(DecodeError::TruncatedStream);
        }
        Ok(buf)
    }

    fn read_compressed_int(&mut self) -> DecodeResult<i64> {
        let header = self.read_byte()?;
        decode_compressed_int(self, header)
    }

    /// Read a non-negative compressed integer as a count or length
    fn read_count(&mut self) -> DecodeResult<usize> {
        let value = self.read_compressed_int()?;
        usize::try_from(value).map_err(|_| DecodeError::NegativeCount)
    }

    fn read_string(&mut self) -> DecodeResult<String> {
        let len = self.read_count()?;
        bytes_to_string(self.read_bytes(len)?)
    }

    /// Read a string, or `None` if the stream ends before its first byte
    fn read_string_opt(&mut self) -> DecodeResult<Option<String>> {
        let Some(header) = self.read_byte_opt()? else {
            return Ok(None);
        };
        let len = decode_compressed_int(self, header)?;
        let len = usize::try_from(len).map_err(|_| DecodeError::NegativeCount)?;
        bytes_to_string(self.read_bytes(len)?).map(Some)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}

fn decode_compressed_int<R: Read + ?Sized>(input: &mut R, header: u8) -> DecodeResult<i64> {
    let size = header & 0x7f;
    if size == 0 {
        return Ok(0);
    }
    if size > MAX_COMPRESSED_BYTES {
        return Err(DecodeError::InvalidCompressedInt { size });
    }

    let mut magnitude: u64 = 0;
    for i in 0..size {
        magnitude |= (input.read_byte()? as u64) << (8 * i as u32);
    }

    let value = magnitude as i64;
    Ok(if header & 0x80 != 0 { value.wrapping_neg() } else { value })
}

fn bytes_to_string(bytes: Vec<u8>) -> DecodeResult<String> {
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_int(v: i64) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_compressed_int(v).unwrap();
        out
    }

    #[test]
    fn test_compressed_int_layout() {
        assert_eq!(encode_int(0), vec![0]);
        assert_eq!(encode_int(5), vec![1, 5]);
        assert_eq!(encode_int(300), vec![2, 0x2c, 0x01]);
        assert_eq!(encode_int(-1), vec![0x81, 1]);
    }

    #[test]
    fn test_compressed_int_read_back() {
        for v in [0, 1, 127, 255, 256, 65_535, 1 << 40, -7, i32::MIN as i64] {
            let bytes = encode_int(v);
            assert_eq!((&bytes[..]).read_compressed_int().unwrap(), v);
        }
    }

    #[test]
    fn test_compressed_int_oversized_header() {
        let bytes = [9u8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            (&bytes[..]).read_compressed_int(),
            Err(DecodeError::InvalidCompressedInt { size: 9 })
        ));
    }

    #[test]
    fn test_compressed_int_truncated() {
        let bytes = [2u8, 0x2c];
        assert!(matches!(
            (&bytes[..]).read_compressed_int(),
            Err(DecodeError::TruncatedStream)
        ));
    }

    #[test]
    fn test_string_layout() {
        let mut out = Vec::new();
        out.write_string("abc").unwrap();
        assert_eq!(out, vec![1, 3, b'a', b'b', b'c']);
        assert_eq!((&out[..]).read_string().unwrap(), "abc");
    }

    #[test]
    fn test_string_opt_at_eof() {
        let empty: &[u8] = &[];
        assert_eq!((&empty[..]).read_string_opt().unwrap(), None);
    }

    #[test]
    fn test_negative_length() {
        let bytes = [0x81u8, 1];
        assert!(matches!(
            (&bytes[..]).read_string(),
            Err(DecodeError::NegativeCount)
        ));
    }

    #[test]
    fn test_string_invalid_utf8() {
        let bytes = [1u8, 2, 0xff, 0xfe];
        assert!(matches!(
            (&bytes[..]).read_string(),
            Err(DecodeError::InvalidUtf8)
        ));
    }
}
