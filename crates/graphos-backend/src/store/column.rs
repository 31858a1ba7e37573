//! Backend columns: the atomic unit of storage.

use std::cmp::Ordering;
use std::fmt;

use bytes::Bytes;
use graphos_common::utils::bytes as byte_utils;

/// A binary name/value pair as stored by a backend.
///
/// Columns order by `name` alone, while equality compares both `name` and
/// `value`. Because of that split the type does not implement [`Ord`]; use
/// [`cmp_name`](Self::cmp_name), [`compare_to`](Self::compare_to), or
/// [`sort_columns`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BackendColumn {
    /// Column name (usually the full row key or a qualifier under it).
    pub name: Bytes,
    /// Column value.
    pub value: Bytes,
}

impl BackendColumn {
    /// Creates a column. Empty names and values are allowed.
    pub fn of(name: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the name bytes.
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Returns the value bytes.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Compares two columns by name, byte-wise.
    #[must_use]
    pub fn cmp_name(&self, other: &Self) -> Ordering {
        byte_utils::compare(&self.name, &other.name)
    }

    /// Compares against a possibly missing column.
    ///
    /// Any column sorts before "no column".
    #[must_use]
    pub fn compare_to(&self, other: Option<&Self>) -> Ordering {
        match other {
            Some(other) => self.cmp_name(other),
            None => Ordering::Greater,
        }
    }

    /// Returns true if the name starts with `prefix`.
    #[must_use]
    pub fn has_name_prefix(&self, prefix: &[u8]) -> bool {
        byte_utils::prefix_with(&self.name, prefix)
    }

    /// Returns the combined byte size of name and value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.name.len() + self.value.len()
    }

    /// Returns true if both name and value are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }
}

impl fmt::Display for BackendColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            byte_utils::decode_lossy(&self.name),
            byte_utils::decode_lossy(&self.value)
        )
    }
}

/// Sorts columns by name. The sort is stable, so duplicate names keep their
/// relative order and the last one still wins on read.
pub fn sort_columns(columns: &mut [BackendColumn]) {
    columns.sort_by(BackendColumn::cmp_name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_of_accepts_empty() {
        let col = BackendColumn::of(Bytes::new(), Bytes::new());
        assert!(col.is_empty());
        assert_eq!(col.len(), 0);
        assert_eq!(col.to_string(), "=");
    }

    #[test]
    fn test_order_ignores_value() {
        let a = BackendColumn::of("name", "alice");
        let b = BackendColumn::of("name", "bob");
        assert_eq!(a.cmp_name(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_partner_sorts_greater() {
        let col = BackendColumn::of("a", "1");
        assert_eq!(col.compare_to(None), Ordering::Greater);
        assert_eq!(
            col.compare_to(Some(&BackendColumn::of("b", "2"))),
            Ordering::Less
        );
    }

    #[test]
    fn test_display() {
        let col = BackendColumn::of("name", "alice");
        assert_eq!(col.to_string(), "name=alice");
        let binary = BackendColumn::of(vec![0x6bu8, 0xff], "v");
        assert_eq!(binary.to_string(), "k\u{fffd}=v");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut cols = vec![
            BackendColumn::of("b", "1"),
            BackendColumn::of("a", "1"),
            BackendColumn::of("b", "2"),
        ];
        sort_columns(&mut cols);
        assert_eq!(cols[0].name(), b"a");
        assert_eq!(cols[1], BackendColumn::of("b", "1"));
        assert_eq!(cols[2], BackendColumn::of("b", "2"));
    }

    #[test]
    fn test_name_prefix() {
        let col = BackendColumn::of("V1:name", "alice");
        assert!(col.has_name_prefix(b"V1"));
        assert!(!col.has_name_prefix(b"V2"));
    }

    fn column() -> impl Strategy<Value = BackendColumn> {
        (
            proptest::collection::vec(any::<u8>(), 0..8),
            proptest::collection::vec(any::<u8>(), 0..8),
        )
            .prop_map(|(name, value)| BackendColumn::of(name, value))
    }

    proptest! {
        #[test]
        fn prop_compare_is_antisymmetric(a in column(), b in column()) {
            prop_assert_eq!(a.cmp_name(&b), b.cmp_name(&a).reverse());
        }

        #[test]
        fn prop_equality_is_bytewise(a in column(), b in column()) {
            let same = a.name == b.name && a.value == b.value;
            prop_assert_eq!(a == b, same);
            prop_assert_eq!(a.clone(), a.clone());
        }

        #[test]
        fn prop_equal_columns_compare_equal(a in column()) {
            let copy = BackendColumn::of(a.name.to_vec(), a.value.to_vec());
            prop_assert_eq!(&a, &copy);
            prop_assert_eq!(a.cmp_name(&copy), Ordering::Equal);
            prop_assert_eq!(a.compare_to(None), Ordering::Greater);
        }
    }
}
