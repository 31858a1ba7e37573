//! Error types for the Graphos backend.
//!
//! Every failure in the record core is structural: nothing here is retried.
//! Retry policy for transient storage I/O belongs to the backend adapter that
//! produced the failing column source.

use thiserror::Error;

/// Result type alias using the backend [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by records, cursors, and the utilities around them.
#[derive(Error, Debug)]
pub enum Error {
    /// A cursor was advanced past its last column.
    #[error("no more columns in sequence")]
    Exhausted,

    /// Two entries with different identity were merged.
    #[error("can't merge entry {found} into entry {expected}")]
    IncompatibleMerge {
        /// Identity of the receiving entry.
        expected: String,
        /// Identity of the entry that was offered.
        found: String,
    },

    /// The underlying column source failed to release its resources.
    #[error("failed to release column source: {0}")]
    Release(String),

    /// Bytes could not be decoded into a value of the expected shape.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A page token could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from a backend source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if this error signals an over-advanced cursor.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}
