//! Dynamically typed property values
//!
//! `Value` is a closed tagged union. Equality is loose across kinds so that
//! a value survives a trip through the markup form, where everything becomes
//! text: `Int(5) == String("5")`, `Double(1.0) == Int(1)`, `Void == String("")`.

pub mod stream;

use base64ct::{Base64, Encoding};
use std::fmt;

/// Prefix used when rendering binary blobs as text
pub const BINARY_TEXT_PREFIX: &str = "base64:";

#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent / null
    #[default]
    Void,
    Bool(bool),
    Int(i32),
    Int64(i64),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
}

impl Value {
    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Borrow the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the blob payload, if this is binary
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Integer view; strings are parsed, doubles truncated
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(*b as i64),
            Value::Int(i) => Some(*i as i64),
            Value::Int64(i) => Some(*i),
            Value::Double(d) => Some(*d as i64),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|d| d as i64))
            }
            Value::Void | Value::Binary(_) => None,
        }
    }

    /// Floating point view; strings are parsed
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Int64(i) => Some(*i as f64),
            Value::Double(d) => Some(*d),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Void | Value::Binary(_) => None,
        }
    }

    /// Boolean view; `"true"` and any non-zero number are true
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
            other => other.as_f64().map(|d| d != 0.0),
        }
    }

    /// Text rendering used for markup attributes
    pub fn to_text(&self) -> String {
        match self {
            Value::Void => String::new(),
            Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
            Value::Int(i) => i.to_string(),
            Value::Int64(i) => i.to_string(),
            Value::Double(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Binary(b) => format!("{}{}", BINARY_TEXT_PREFIX, Base64::encode_string(b)),
        }
    }

    /// Decode a blob previously rendered with `to_text`
    pub fn binary_from_text(text: &str) -> Option<Value> {
        let encoded = text.strip_prefix(BINARY_TEXT_PREFIX)?;
        Base64::decode_vec(encoded).ok().map(Value::Binary)
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Int(_) | Value::Int64(_) | Value::Double(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Void, Value::String(s)) | (Value::String(s), Value::Void) => s.is_empty(),
            (Value::Void, _) | (_, Value::Void) => false,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            // NaN equals NaN so a value always equals its own copy
            (Value::Double(a), Value::Double(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::String(_), _) | (_, Value::String(_)) => self.to_text() == other.to_text(),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                if matches!(a, Value::Double(_)) || matches!(b, Value::Double(_)) {
                    a.as_f64() == b.as_f64()
                } else {
                    a.as_i64() == b.as_i64()
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Double(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Binary(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Void, Into::into)
    }
}
