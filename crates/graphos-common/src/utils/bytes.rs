//! Byte comparison and encoding helpers.
//!
//! Backends lay keys out so that byte order matches logical order. These
//! helpers are the only place the core looks at raw key bytes.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Compares two byte strings lexicographically, treating bytes as unsigned.
#[inline]
#[must_use]
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Returns true if `bytes` starts with `prefix`.
///
/// An empty prefix matches everything.
#[inline]
#[must_use]
pub fn prefix_with(bytes: &[u8], prefix: &[u8]) -> bool {
    bytes.starts_with(prefix)
}

/// Decodes bytes as UTF-8 for diagnostics, replacing invalid sequences.
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Returns the smallest byte string that sorts strictly after `bytes`.
///
/// Appending a zero byte gives the immediate successor in lexicographic
/// order, which is what an exclusive-start range scan needs.
#[must_use]
pub fn successor(bytes: &[u8]) -> Vec<u8> {
    let mut next = Vec::with_capacity(bytes.len() + 1);
    next.extend_from_slice(bytes);
    next.push(0x00);
    next
}
