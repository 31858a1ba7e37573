//! Entity identifiers.
//!
//! An [`Id`] is the primary key of a stored entity. What the backend core
//! needs from it is a byte serialization that preserves order, so a range
//! scan over serialized ids visits entities in id order.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Identifier of a stored entity.
///
/// [`Id::Empty`] is the designated "no value" identifier, used for the
/// optional origin and sub identifiers of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Id {
    /// No identifier.
    #[default]
    Empty,
    /// A signed numeric identifier.
    Number(i64),
    /// A textual identifier.
    String(String),
    /// A 128-bit UUID.
    Uuid(u128),
    /// An identifier already in serialized form (e.g. a composite edge id).
    Bytes(Bytes),
}

impl Id {
    /// Returns true if this is the "no value" identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the numeric value, if this is a numeric id.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, if this is a textual id.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Serializes the id to bytes.
    ///
    /// Numbers are written big-endian with the sign bit flipped so that
    /// byte order equals numeric order, including across zero.
    #[must_use]
    pub fn as_bytes(&self) -> Bytes {
        match self {
            Self::Empty => Bytes::new(),
            Self::Number(n) => {
                let flipped = (*n as u64) ^ (1 << 63);
                Bytes::copy_from_slice(&flipped.to_be_bytes())
            }
            Self::String(s) => Bytes::copy_from_slice(s.as_bytes()),
            Self::Uuid(u) => Bytes::copy_from_slice(&u.to_be_bytes()),
            Self::Bytes(b) => b.clone(),
        }
    }

    /// Returns the serialized length in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Number(_) => 8,
            Self::String(s) => s.len(),
            Self::Uuid(_) => 16,
            Self::Bytes(b) => b.len(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Uuid(u) => {
                let hex = format!("{u:032x}");
                write!(
                    f,
                    "{}-{}-{}-{}-{}",
                    &hex[0..8],
                    &hex[8..12],
                    &hex[12..16],
                    &hex[16..20],
                    &hex[20..32]
                )
            }
            Self::Bytes(b) => write!(f, "{}", crate::utils::bytes::decode_lossy(b)),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Bytes> for Id {
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_bytes_preserve_order() {
        let ids = [-300i64, -1, 0, 1, 42, i64::MAX];
        for pair in ids.windows(2) {
            let a = Id::Number(pair[0]).as_bytes();
            let b = Id::Number(pair[1]).as_bytes();
            assert!(a < b, "{} should sort before {}", pair[0], pair[1]);
        }
        assert_eq!(Id::Number(i64::MIN).as_bytes().as_ref(), &[0u8; 8]);
    }

    #[test]
    fn test_string_and_bytes() {
        assert_eq!(Id::from("V1").as_bytes().as_ref(), b"V1");
        let raw = Bytes::from_static(b"\x01\x02");
        assert_eq!(Id::from(raw.clone()).as_bytes(), raw);
        assert_eq!(Id::from("V1").byte_len(), 2);
    }

    #[test]
    fn test_empty_id() {
        let id = Id::default();
        assert!(id.is_empty());
        assert!(id.as_bytes().is_empty());
        assert_eq!(id.to_string(), "");
        assert!(!Id::from(7).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Id::Number(-5).to_string(), "-5");
        assert_eq!(Id::from("alice").to_string(), "alice");
        assert_eq!(
            Id::Uuid(0x1234_5678_9abc_def0_1122_3344_5566_7788).to_string(),
            "12345678-9abc-def0-1122-334455667788"
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Id::Number(3).as_number(), Some(3));
        assert_eq!(Id::from("x").as_number(), None);
        assert_eq!(Id::from("x").as_str(), Some("x"));
        assert_eq!(Id::Uuid(1).byte_len(), 16);
    }
}
