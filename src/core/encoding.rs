//! XML Encoding Detection and Conversion
//!
//! Detects UTF-16 input from its BOM or byte pattern and converts it to UTF-8
//! before tokenizing. A UTF-8 BOM is stripped.

use crate::error::MarkupError;
use std::borrow::Cow;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encoding of raw markup input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        match input {
            [0xFF, 0xFE, ..] | [b'<', 0x00, ..] => XmlEncoding::Utf16Le,
            [0xFE, 0xFF, ..] | [0x00, b'<', ..] => XmlEncoding::Utf16Be,
            _ => XmlEncoding::Utf8,
        }
    }
}

/// Convert markup bytes to UTF-8, borrowing when no conversion is needed.
pub fn convert_to_utf8(input: &[u8]) -> Result<Cow<'_, [u8]>, MarkupError> {
    match XmlEncoding::detect(input) {
        XmlEncoding::Utf8 => Ok(Cow::Borrowed(input.strip_prefix(&UTF8_BOM).unwrap_or(input))),
        XmlEncoding::Utf16Le => decode_utf16(input, [0xFF, 0xFE], u16::from_le_bytes, "LE"),
        XmlEncoding::Utf16Be => decode_utf16(input, [0xFE, 0xFF], u16::from_be_bytes, "BE"),
    }
}

fn decode_utf16(
    input: &[u8],
    bom: [u8; 2],
    unit: fn([u8; 2]) -> u16,
    label: &str,
) -> Result<Cow<'static, [u8]>, MarkupError> {
    let bytes = input.strip_prefix(&bom).unwrap_or(input);

    if bytes.len() % 2 != 0 {
        return Err(MarkupError::Encoding(format!(
            "Invalid UTF-16 {label}: odd number of bytes"
        )));
    }

    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units)
        .map(|s| Cow::Owned(s.into_bytes()))
        .map_err(|e| MarkupError::Encoding(format!("Invalid UTF-16 {label}: {e}")))
}
