//! Continuation tokens for resumable scans.

use bytes::Bytes;
use graphos_common::utils::bytes as byte_utils;
use graphos_common::utils::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Opaque marker for where a scan stopped.
///
/// For range scans this is the name of the last column yielded. Callers pass
/// it back unchanged; only the backend that produced it interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position(Bytes);

impl Position {
    /// Creates a position from raw bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the position and returns the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns the first key a resumed range scan should start at.
    ///
    /// The position itself was already yielded, so the scan resumes at its
    /// immediate successor. Any later column with the same name as the
    /// position is skipped as well.
    #[must_use]
    pub fn resume_key(&self) -> Vec<u8> {
        byte_utils::successor(&self.0)
    }
}

/// Serializable paging state handed to clients between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Where the previous page stopped.
    pub position: Position,
    /// Number of columns yielded so far across pages.
    pub offset: u64,
}

impl PageState {
    /// Creates a page state.
    #[must_use]
    pub fn new(position: Position, offset: u64) -> Self {
        Self { position, offset }
    }

    /// Encodes the state into a token.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decodes a token produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (state, read): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())
                .map_err(|e| Error::Serialization(e.to_string()))?;
        if read != bytes.len() {
            return Err(Error::Serialization(format!(
                "page state has {} trailing bytes",
                bytes.len() - read
            )));
        }
        Ok(state)
    }
}
