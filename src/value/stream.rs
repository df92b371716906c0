//! Binary encoding of a single `Value`
//!
//! Layout: compressed payload size, then (if non-zero) a one-byte tag and
//! the payload. Unknown tags are skipped and read back as `Void`.

use super::Value;
use crate::error::{DecodeError, DecodeResult};
use crate::stream::{ReadExt, WriteExt};
use std::io::{self, Read, Write};

const TAG_INT: u8 = 1;
const TAG_BOOL_TRUE: u8 = 2;
const TAG_BOOL_FALSE: u8 = 3;
const TAG_DOUBLE: u8 = 4;
const TAG_STRING: u8 = 5;
const TAG_INT64: u8 = 6;
const TAG_BINARY: u8 = 8;

impl Value {
    pub fn write_to<W: Write + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        match self {
            Value::Void => output.write_compressed_int(0),
            Value::Bool(b) => {
                output.write_compressed_int(1)?;
                output.write_all(&[if *b { TAG_BOOL_TRUE } else { TAG_BOOL_FALSE }])
            }
            Value::Int(i) => {
                output.write_compressed_int(5)?;
                output.write_all(&[TAG_INT])?;
                output.write_all(&i.to_le_bytes())
            }
            Value::Int64(i) => {
                output.write_compressed_int(9)?;
                output.write_all(&[TAG_INT64])?;
                output.write_all(&i.to_le_bytes())
            }
            Value::Double(d) => {
                output.write_compressed_int(9)?;
                output.write_all(&[TAG_DOUBLE])?;
                output.write_all(&d.to_le_bytes())
            }
            Value::String(s) => {
                output.write_len(s.len() + 2)?;
                output.write_all(&[TAG_STRING])?;
                output.write_all(s.as_bytes())?;
                output.write_all(&[0])
            }
            Value::Binary(b) => {
                output.write_len(b.len() + 1)?;
                output.write_all(&[TAG_BINARY])?;
                output.write_all(b)
            }
        }
    }

    pub fn read_from<R: Read + ?Sized>(input: &mut R) -> DecodeResult<Value> {
        let size = input.read_count()?;
        if size == 0 {
            return Ok(Value::Void);
        }

        let tag = input.read_byte()?;
        let payload_len = size - 1;

        let value = match tag {
            TAG_INT if payload_len >= 4 => {
                let v = i32::from_le_bytes(input.read_array()?);
                skip(input, payload_len - 4)?;
                Value::Int(v)
            }
            TAG_BOOL_TRUE => {
                skip(input, payload_len)?;
                Value::Bool(true)
            }
            TAG_BOOL_FALSE => {
                skip(input, payload_len)?;
                Value::Bool(false)
            }
            TAG_DOUBLE if payload_len >= 8 => {
                let v = f64::from_le_bytes(input.read_array()?);
                skip(input, payload_len - 8)?;
                Value::Double(v)
            }
            TAG_INT64 if payload_len >= 8 => {
                let v = i64::from_le_bytes(input.read_array()?);
                skip(input, payload_len - 8)?;
                Value::Int64(v)
            }
            TAG_STRING => {
                let mut bytes = input.read_bytes(payload_len)?;
                if bytes.last() == Some(&0) {
                    bytes.pop();
                }
                match String::from_utf8(bytes) {
                    Ok(s) => Value::String(s),
                    Err(_) => return Err(DecodeError::InvalidUtf8),
                }
            }
            TAG_BINARY => Value::Binary(input.read_bytes(payload_len)?),
            other => {
                tracing::debug!(tag = other, size, "skipping value with unknown tag");
                skip(input, payload_len)?;
                Value::Void
            }
        };

        Ok(value)
    }
}

fn skip<R: Read + ?Sized>(input: &mut R, len: usize) -> DecodeResult<()> {
    if len > 0 {
        input.read_bytes(len)?;
    }
    Ok(())
}
