//! Index key values and their order-preserving byte encoding
//!
//! Byte-lexicographic order of encoded keys matches the order of the values
//! within one field type:
//! - String: UTF-8 bytes followed by a 0x00 terminator
//! - Int: big-endian bytes with the sign bit flipped
//! - Bool: a single byte (false < true)
//!
//! The string terminator keeps "5" from being a byte prefix of "54", so a
//! lookup on one value never bleeds into its neighbours.

use std::fmt;

use serde_json::Value;

use crate::errors::{DbError, DbResult};
use crate::schema::FieldType;

const STRING_TERMINATOR: u8 = 0x00;
const SIGN_BIT: u64 = 1 << 63;

/// A single index field value.
///
/// Ordering is deterministic: Bool < Int < String.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// Boolean value (false < true)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// String value
    String(String),
}

impl IndexKey {
    /// Create a key from a boolean
    pub fn from_bool(v: bool) -> Self {
        IndexKey::Bool(v)
    }

    /// Create a key from an integer
    pub fn from_int(v: i64) -> Self {
        IndexKey::Int(v)
    }

    /// Create a key from a string
    pub fn from_string(v: impl Into<String>) -> Self {
        IndexKey::String(v.into())
    }

    /// Create a key from a JSON value
    ///
    /// Only booleans, integers and strings are indexable.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(IndexKey::from_bool(*b)),
            Value::Number(n) => n.as_i64().map(IndexKey::from_int),
            Value::String(s) => Some(IndexKey::from_string(s.as_str())),
            _ => None,
        }
    }

    /// Returns the field type this value belongs to
    pub fn field_type(&self) -> FieldType {
        match self {
            IndexKey::Bool(_) => FieldType::Bool,
            IndexKey::Int(_) => FieldType::Int,
            IndexKey::String(_) => FieldType::String,
        }
    }

    /// Append the encoded form of this value to `out`.
    ///
    /// `index` only names the index in error messages.
    pub fn encode_into(&self, index: &str, out: &mut Vec<u8>) -> DbResult<()> {
        match self {
            IndexKey::Bool(b) => out.push(u8::from(*b)),
            IndexKey::Int(i) => out.extend_from_slice(&((*i as u64) ^ SIGN_BIT).to_be_bytes()),
            IndexKey::String(s) => {
                if s.as_bytes().contains(&STRING_TERMINATOR) {
                    return Err(DbError::encoding(index, "string values may not contain NUL bytes"));
                }
                out.extend_from_slice(s.as_bytes());
                out.push(STRING_TERMINATOR);
            }
        }
        Ok(())
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Bool(b) => write!(f, "{}", b),
            IndexKey::Int(i) => write!(f, "{}", i),
            IndexKey::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for IndexKey {
    fn from(v: &str) -> Self {
        IndexKey::from_string(v)
    }
}

impl From<String> for IndexKey {
    fn from(v: String) -> Self {
        IndexKey::String(v)
    }
}

impl From<i64> for IndexKey {
    fn from(v: i64) -> Self {
        IndexKey::Int(v)
    }
}

impl From<i32> for IndexKey {
    fn from(v: i32) -> Self {
        IndexKey::Int(i64::from(v))
    }
}

impl From<u32> for IndexKey {
    fn from(v: u32) -> Self {
        IndexKey::Int(i64::from(v))
    }
}

impl From<bool> for IndexKey {
    fn from(v: bool) -> Self {
        IndexKey::Bool(v)
    }
}
