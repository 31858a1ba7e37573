//! Backend entries: one logical entity as materialized by one backend.
//!
//! An entry groups the columns that encode a vertex, edge, index entry, or
//! analytics row. Partial entries with the same identity can be merged; a
//! merge appends columns and never deduplicates them, so readers that keep
//! the last value per name see last-write-wins semantics.

use std::fmt;

use graphos_common::types::{EntityKind, Id};
use graphos_common::utils::error::{Error, Result};

use super::column::BackendColumn;

/// The record contract every backend entry implements.
///
/// Entries are not synchronized. Share one across threads only behind a lock
/// or by cloning it first.
pub trait BackendEntry: fmt::Debug {
    /// Returns the entity kind. Fixed at construction.
    fn kind(&self) -> EntityKind;

    /// Returns the primary identifier.
    fn id(&self) -> &Id;

    /// Returns the id this entry was derived from, or [`Id::Empty`].
    fn origin_id(&self) -> &Id;

    /// Returns the secondary identifier, or [`Id::Empty`].
    fn sub_id(&self) -> &Id;

    /// Returns the time-to-live in milliseconds. Zero means never expires.
    fn ttl(&self) -> u64;

    /// Returns the current columns, in insertion order.
    fn columns(&self) -> &[BackendColumn];

    /// Replaces all columns with `columns`.
    fn set_columns(&mut self, columns: Vec<BackendColumn>);

    /// Appends one column. Duplicate names are kept.
    fn push_column(&mut self, column: BackendColumn);

    /// Removes all columns. Identity is unchanged.
    fn clear(&mut self);

    /// Returns the number of columns, duplicates included.
    fn columns_size(&self) -> usize {
        self.columns().len()
    }

    /// Returns true if `other` has the same kind and primary id.
    fn mergeable(&self, other: &dyn BackendEntry) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }

    /// Appends the columns of `other`, in the order it exposes them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleMerge`] if the entries are not mergeable.
    fn merge(&mut self, other: &dyn BackendEntry) -> Result<()> {
        if !self.mergeable(other) {
            tracing::warn!(
                kind = %self.kind(),
                id = %self.id(),
                other_kind = %other.kind(),
                other_id = %other.id(),
                "rejected merge of entries with different identity"
            );
            return Err(Error::IncompatibleMerge {
                expected: format!("{}:{}", self.kind(), self.id()),
                found: format!("{}:{}", other.kind(), other.id()),
            });
        }
        tracing::debug!(
            id = %self.id(),
            existing = self.columns_size(),
            incoming = other.columns_size(),
            "merging entry"
        );
        for column in other.columns() {
            self.push_column(column.clone());
        }
        Ok(())
    }

    /// Returns true if the column's name is prefixed by this entry's id bytes.
    ///
    /// Used to demultiplex interleaved columns of several entries in a scan.
    fn belong_to_me(&self, column: &BackendColumn) -> bool {
        column.has_name_prefix(&self.id().as_bytes())
    }

    /// Returns true for analytics-only entries.
    fn olap(&self) -> bool {
        false
    }

    /// Returns the last column named `name`.
    fn column(&self, name: &[u8]) -> Option<&BackendColumn> {
        self.columns().iter().rev().find(|col| col.name() == name)
    }

    /// Returns true if the entry declares an expiry.
    fn has_ttl(&self) -> bool {
        self.ttl() > 0
    }

    /// Returns the declared expiry time for an entry written at
    /// `written_at` (milliseconds since the epoch).
    ///
    /// Nothing in this crate acts on the value.
    fn expires_at(&self, written_at: u64) -> Option<u64> {
        self.has_ttl()
            .then(|| written_at.saturating_add(self.ttl()))
    }
}

/// General-purpose binary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryEntry {
    kind: EntityKind,
    id: Id,
    origin_id: Id,
    sub_id: Id,
    ttl: u64,
    columns: Vec<BackendColumn>,
}

impl BinaryEntry {
    /// Creates an empty entry.
    ///
    /// `id` must not be [`Id::Empty`]: an empty id prefixes every column, so
    /// [`belong_to_me`](BackendEntry::belong_to_me) would claim them all. Use
    /// [`try_new`](Self::try_new) when the id comes from decoded storage.
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<Id>) -> Self {
        Self {
            kind,
            id: id.into(),
            origin_id: Id::Empty,
            sub_id: Id::Empty,
            ttl: 0,
            columns: Vec::new(),
        }
    }

    /// Creates an empty entry, rejecting an empty id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if `id` is [`Id::Empty`].
    pub fn try_new(kind: EntityKind, id: impl Into<Id>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::Encoding(format!("{kind} entry requires a non-empty id")));
        }
        Ok(Self::new(kind, id))
    }

    /// Sets the origin id.
    #[must_use]
    pub fn with_origin_id(mut self, origin_id: impl Into<Id>) -> Self {
        self.origin_id = origin_id.into();
        self
    }

    /// Sets the sub id.
    #[must_use]
    pub fn with_sub_id(mut self, sub_id: impl Into<Id>) -> Self {
        self.sub_id = sub_id.into();
        self
    }

    /// Sets the time-to-live in milliseconds.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the initial columns.
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = BackendColumn>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Consumes the entry and returns its columns.
    #[must_use]
    pub fn into_columns(self) -> Vec<BackendColumn> {
        self.columns
    }
}

impl BackendEntry for BinaryEntry {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn origin_id(&self) -> &Id {
        &self.origin_id
    }

    fn sub_id(&self) -> &Id {
        &self.sub_id
    }

    fn ttl(&self) -> u64 {
        self.ttl
    }

    fn columns(&self) -> &[BackendColumn] {
        &self.columns
    }

    fn set_columns(&mut self, columns: Vec<BackendColumn>) {
        self.columns = columns;
    }

    fn push_column(&mut self, column: BackendColumn) {
        self.columns.push(column);
    }

    fn clear(&mut self) {
        self.columns.clear();
    }
}

impl fmt::Display for BinaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}[", self.kind, self.id)?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}")?;
        }
        f.write_str("]")
    }
}

/// Entry for analytics-only data.
///
/// Behaves like a [`BinaryEntry`] but reports [`olap`](BackendEntry::olap)
/// so storage placement can route it to separate tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OlapEntry {
    inner: BinaryEntry,
}

impl OlapEntry {
    /// Creates an empty OLAP entry of kind [`EntityKind::Olap`].
    #[must_use]
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            inner: BinaryEntry::new(EntityKind::Olap, id),
        }
    }

    /// Wraps an existing entry.
    #[must_use]
    pub fn from_entry(inner: BinaryEntry) -> Self {
        Self { inner }
    }

    /// Unwraps the inner entry.
    #[must_use]
    pub fn into_inner(self) -> BinaryEntry {
        self.inner
    }
}

impl BackendEntry for OlapEntry {
    fn kind(&self) -> EntityKind {
        self.inner.kind()
    }

    fn id(&self) -> &Id {
        self.inner.id()
    }

    fn origin_id(&self) -> &Id {
        self.inner.origin_id()
    }

    fn sub_id(&self) -> &Id {
        self.inner.sub_id()
    }

    fn ttl(&self) -> u64 {
        self.inner.ttl()
    }

    fn columns(&self) -> &[BackendColumn] {
        self.inner.columns()
    }

    fn set_columns(&mut self, columns: Vec<BackendColumn>) {
        self.inner.set_columns(columns);
    }

    fn push_column(&mut self, column: BackendColumn) {
        self.inner.push_column(column);
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn olap(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(id: &str, columns: &[(&'static str, &'static str)]) -> BinaryEntry {
        BinaryEntry::new(EntityKind::Vertex, id).with_columns(
            columns
                .iter()
                .map(|&(name, value)| BackendColumn::of(name, value)),
        )
    }

    #[test]
    fn test_merge_appends() {
        let mut r1 = vertex("V1", &[("name", "alice")]);
        let r2 = vertex("V1", &[("age", "30")]);

        r1.merge(&r2).unwrap();

        assert_eq!(r1.id(), &Id::from("V1"));
        assert_eq!(
            r1.columns(),
            &[
                BackendColumn::of("name", "alice"),
                BackendColumn::of("age", "30")
            ]
        );
    }

    #[test]
    fn test_merge_different_id_fails() {
        let mut r1 = vertex("V1", &[("name", "alice")]);
        let r3 = vertex("V2", &[("name", "bob")]);

        let err = r1.merge(&r3).unwrap_err();
        assert!(matches!(err, Error::IncompatibleMerge { .. }));
        assert_eq!(r1.columns_size(), 1);
    }

    #[test]
    fn test_merge_different_kind_fails() {
        let mut vertex = vertex("V1", &[]);
        let edge = BinaryEntry::new(EntityKind::EdgeOut, "V1");
        assert!(!vertex.mergeable(&edge));
        assert!(vertex.merge(&edge).is_err());
    }

    #[test]
    fn test_merge_with_self_duplicates() {
        let mut entry = vertex("V1", &[("name", "alice"), ("age", "30")]);
        let copy = entry.clone();
        assert!(entry.mergeable(&copy));

        entry.merge(&copy).unwrap();
        assert_eq!(entry.columns_size(), 4);
    }

    #[test]
    fn test_last_write_wins_lookup() {
        let mut entry = vertex("V1", &[("name", "alice")]);
        entry.merge(&vertex("V1", &[("name", "alicia")])).unwrap();

        assert_eq!(entry.columns_size(), 2);
        assert_eq!(entry.column(b"name").unwrap().value(), b"alicia");
        assert!(entry.column(b"missing").is_none());
    }

    #[test]
    fn test_clear_keeps_identity() {
        let mut entry = vertex("V1", &[("name", "alice")]).with_sub_id("OE:knows");
        entry.clear();

        assert_eq!(entry.columns_size(), 0);
        assert_eq!(entry.id(), &Id::from("V1"));
        assert_eq!(entry.kind(), EntityKind::Vertex);
        assert_eq!(entry.sub_id(), &Id::from("OE:knows"));
    }

    #[test]
    fn test_set_and_push_columns() {
        let mut entry = vertex("V1", &[("a", "1"), ("b", "2")]);
        entry.set_columns(vec![BackendColumn::of("c", "3")]);
        assert_eq!(entry.columns_size(), 1);

        entry.push_column(BackendColumn::of("c", "4"));
        assert_eq!(entry.columns_size(), 2);
        assert_eq!(entry.into_columns()[1], BackendColumn::of("c", "4"));
    }

    #[test]
    fn test_belong_to_me() {
        let entry = BinaryEntry::new(EntityKind::Vertex, 7i64);
        let mut mine = Id::Number(7).as_bytes().to_vec();
        mine.extend_from_slice(b"name");
        let mut other = Id::Number(8).as_bytes().to_vec();
        other.extend_from_slice(b"name");

        assert!(entry.belong_to_me(&BackendColumn::of(mine, "alice")));
        assert!(!entry.belong_to_me(&BackendColumn::of(other, "bob")));
    }

    #[test]
    fn test_try_new_rejects_empty_id() {
        let err = BinaryEntry::try_new(EntityKind::Vertex, Id::Empty).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));

        let entry = BinaryEntry::try_new(EntityKind::Vertex, "V1").unwrap();
        assert_eq!(entry.id(), &Id::from("V1"));
        assert!(!entry.belong_to_me(&BackendColumn::of("V9:x", "1")));
    }

    #[test]
    fn test_ttl() {
        let entry = vertex("V1", &[]);
        assert_eq!(entry.ttl(), 0);
        assert!(!entry.has_ttl());
        assert_eq!(entry.expires_at(1_000), None);

        let entry = entry.with_ttl(500);
        assert!(entry.has_ttl());
        assert_eq!(entry.expires_at(1_000), Some(1_500));
        assert_eq!(entry.expires_at(u64::MAX), Some(u64::MAX));
    }

    #[test]
    fn test_optional_ids_default_to_empty() {
        let entry = vertex("V1", &[]);
        assert!(entry.origin_id().is_empty());
        assert!(entry.sub_id().is_empty());

        let shard = entry.with_origin_id("V1").with_sub_id(3i64);
        assert_eq!(shard.origin_id(), &Id::from("V1"));
        assert_eq!(shard.sub_id(), &Id::Number(3));
    }

    #[test]
    fn test_olap_entry() {
        let mut olap = OlapEntry::new("V1");
        assert!(olap.olap());
        assert!(!vertex("V1", &[]).olap());
        assert_eq!(olap.kind(), EntityKind::Olap);

        olap.push_column(BackendColumn::of("rank", "0.42"));
        let mut more = OlapEntry::new("V1");
        more.push_column(BackendColumn::of("rank", "0.43"));
        olap.merge(&more).unwrap();
        assert_eq!(olap.columns_size(), 2);
        assert_eq!(olap.into_inner().kind(), EntityKind::Olap);
    }

    #[test]
    fn test_display() {
        let entry = vertex("V1", &[("name", "alice"), ("age", "30")]);
        assert_eq!(entry.to_string(), "V:V1[name=alice, age=30]");
    }
}
