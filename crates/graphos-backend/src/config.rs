//! Scan configuration.

use serde::{Deserialize, Serialize};

use crate::store::Position;

/// Options a caller passes to a backend scan.
///
/// # Examples
///
/// ```
/// use graphos_backend::config::ScanConfig;
///
/// let config = ScanConfig::default().with_page_limit(500);
/// assert_eq!(config.page_limit, Some(500));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum columns per page. `None` scans to the end.
    pub page_limit: Option<usize>,
    /// Where a previous page stopped.
    pub resume_from: Option<Position>,
}

impl ScanConfig {
    /// Creates a config for an unbounded scan from the beginning.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Sets the page limit.
    #[must_use]
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Resumes after the given position.
    #[must_use]
    pub fn with_resume_from(mut self, position: Position) -> Self {
        self.resume_from = Some(position);
        self
    }

    /// Returns the key a backend should seek to, if resuming.
    #[must_use]
    pub fn start_key(&self) -> Option<Vec<u8>> {
        self.resume_from.as_ref().map(Position::resume_key)
    }
}
