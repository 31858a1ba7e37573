//! Entity categories stored by backends.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category of entity a backend entry stores.
///
/// Each kind has a stable one-byte code that backends may use as a table or
/// key-prefix discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Schema: vertex label definition.
    VertexLabel,
    /// Schema: edge label definition.
    EdgeLabel,
    /// Schema: property key definition.
    PropertyKey,
    /// Schema: index label definition.
    IndexLabel,
    /// A vertex with its properties.
    Vertex,
    /// An edge stored under its source vertex.
    EdgeOut,
    /// An edge stored under its target vertex.
    EdgeIn,
    /// A single vertex or edge property stored on its own row.
    Property,
    /// Secondary (equality) index entry.
    SecondaryIndex,
    /// Range index entry over a numeric property.
    RangeIndex,
    /// Full-text search index entry.
    SearchIndex,
    /// Unique index entry.
    UniqueIndex,
    /// Analytics-only property written by OLAP jobs.
    Olap,
    /// Backend statistics (counters, metrics snapshots).
    Statistics,
}

impl EntityKind {
    /// All kinds, in code order.
    pub const ALL: [Self; 14] = [
        Self::VertexLabel,
        Self::EdgeLabel,
        Self::PropertyKey,
        Self::IndexLabel,
        Self::Vertex,
        Self::EdgeOut,
        Self::EdgeIn,
        Self::Property,
        Self::SecondaryIndex,
        Self::RangeIndex,
        Self::SearchIndex,
        Self::UniqueIndex,
        Self::Olap,
        Self::Statistics,
    ];

    /// Returns the stable one-byte code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::VertexLabel => 1,
            Self::EdgeLabel => 2,
            Self::PropertyKey => 3,
            Self::IndexLabel => 4,
            Self::Vertex => 101,
            Self::EdgeOut => 130,
            Self::EdgeIn => 140,
            Self::Property => 120,
            Self::SecondaryIndex => 150,
            Self::RangeIndex => 160,
            Self::SearchIndex => 170,
            Self::UniqueIndex => 178,
            Self::Olap => 200,
            Self::Statistics => 210,
        }
    }

    /// Looks up a kind by its code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    /// Returns a short name for the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::VertexLabel => "VL",
            Self::EdgeLabel => "EL",
            Self::PropertyKey => "PK",
            Self::IndexLabel => "IL",
            Self::Vertex => "V",
            Self::EdgeOut => "OE",
            Self::EdgeIn => "IE",
            Self::Property => "P",
            Self::SecondaryIndex => "SI",
            Self::RangeIndex => "RI",
            Self::SearchIndex => "FI",
            Self::UniqueIndex => "UI",
            Self::Olap => "AP",
            Self::Statistics => "ST",
        }
    }

    /// Returns true for schema definitions.
    #[must_use]
    pub const fn is_schema(self) -> bool {
        matches!(
            self,
            Self::VertexLabel | Self::EdgeLabel | Self::PropertyKey | Self::IndexLabel
        )
    }

    /// Returns true for vertices.
    #[must_use]
    pub const fn is_vertex(self) -> bool {
        matches!(self, Self::Vertex)
    }

    /// Returns true for either edge direction.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(self, Self::EdgeOut | Self::EdgeIn)
    }

    /// Returns true for index entries.
    #[must_use]
    pub const fn is_index(self) -> bool {
        matches!(
            self,
            Self::SecondaryIndex | Self::RangeIndex | Self::SearchIndex | Self::UniqueIndex
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(EntityKind::from_code(0), None);
    }

    #[test]
    fn test_categories() {
        assert!(EntityKind::VertexLabel.is_schema());
        assert!(EntityKind::Vertex.is_vertex());
        assert!(EntityKind::EdgeIn.is_edge());
        assert!(EntityKind::EdgeOut.is_edge());
        assert!(EntityKind::RangeIndex.is_index());
        assert!(!EntityKind::Olap.is_index());
        assert!(!EntityKind::Vertex.is_edge());
    }

    #[test]
    fn test_display() {
        assert_eq!(EntityKind::EdgeOut.to_string(), "OE");
        assert_eq!(EntityKind::Vertex.to_string(), "V");
    }
}
