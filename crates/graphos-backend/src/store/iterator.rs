//! Column cursors returned by backend scans.
//!
//! A backend adapter answers a query with a [`BackendIterator`]. Three
//! general variants live in [`BackendColumnIterator`]:
//!
//! | Variant | Yields | Position |
//! |---------|--------|----------|
//! | Empty | nothing | none |
//! | Single | one column | none |
//! | Wrapped | whatever the source yields | none |
//!
//! Backends that page through range scans use [`PagedColumnIterator`], which
//! reports the last key it yielded so the next request can resume there.
//!
//! Cursors are consumed once, by one reader. Sources may block on network
//! I/O inside `has_next`/`next_column`; run the cursor on a worker thread if
//! that matters to the caller.

use std::fmt;
use std::iter::Peekable;

use bytes::Bytes;
use graphos_common::utils::error::{Error, Result};

use super::column::BackendColumn;
use super::page::{PageState, Position};
use crate::config::ScanConfig;

/// The cursor contract shared by every column iterator.
pub trait BackendIterator {
    /// Returns true if another column is available.
    fn has_next(&mut self) -> bool;

    /// Returns the next column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] once the cursor has no more columns, or
    /// whatever error the underlying source raised.
    fn next_column(&mut self) -> Result<BackendColumn>;

    /// Releases the underlying source. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Returns the source's release failure, if any.
    fn close(&mut self) -> Result<()>;

    /// Returns where a follow-up scan should resume, if the cursor pages.
    fn position(&self) -> Option<Position>;
}

/// A column-producing sequence supplied by a backend driver.
pub trait ColumnSource: Send {
    /// Returns true if another column is available.
    fn has_next(&mut self) -> bool;

    /// Produces the next column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] past the end, or a driver error.
    fn next_column(&mut self) -> Result<BackendColumn>;

    /// Releases driver resources (connections, snapshots, file handles).
    ///
    /// # Errors
    ///
    /// Returns an error if the release fails.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Adapts a plain iterator into a [`ColumnSource`] with nothing to release.
pub struct IterSource<I: Iterator<Item = BackendColumn>> {
    iter: Peekable<I>,
}

impl<I: Iterator<Item = BackendColumn>> IterSource<I> {
    /// Creates a source over `iter`.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter().peekable(),
        }
    }
}

impl<I> ColumnSource for IterSource<I>
where
    I: Iterator<Item = BackendColumn> + Send,
{
    fn has_next(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn next_column(&mut self) -> Result<BackendColumn> {
        self.iter.next().ok_or(Error::Exhausted)
    }
}

/// Owns a boxed source and closes it exactly once.
///
/// If the cursor is dropped without an explicit close, the source is closed
/// on drop. A failure at that point can only be logged.
pub struct WrappedSource {
    source: Option<Box<dyn ColumnSource>>,
}

impl WrappedSource {
    fn new(source: Box<dyn ColumnSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    fn close(&mut self) -> Result<()> {
        match self.source.take() {
            Some(mut source) => {
                tracing::debug!("releasing column source");
                source.close()
            }
            None => Ok(()),
        }
    }
}

impl Drop for WrappedSource {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("failed to release abandoned column source: {}", e);
        }
    }
}

/// The general-purpose column cursor.
pub enum BackendColumnIterator {
    /// Immediately exhausted.
    Empty,
    /// Holds one column until it is taken.
    Single(Option<BackendColumn>),
    /// Delegates to a backend source.
    Wrapped(WrappedSource),
}

impl BackendColumnIterator {
    /// Returns a cursor with no columns.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Returns a cursor yielding exactly `column`.
    #[must_use]
    pub fn single(column: BackendColumn) -> Self {
        Self::Single(Some(column))
    }

    /// Wraps a plain iterator of columns.
    pub fn wrap<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = BackendColumn>,
        I::IntoIter: Send + 'static,
    {
        Self::wrap_source(IterSource::new(columns))
    }

    /// Wraps a backend source that may hold resources.
    pub fn wrap_source(source: impl ColumnSource + 'static) -> Self {
        Self::Wrapped(WrappedSource::new(Box::new(source)))
    }
}

impl BackendIterator for BackendColumnIterator {
    fn has_next(&mut self) -> bool {
        match self {
            Self::Empty => false,
            Self::Single(column) => column.is_some(),
            Self::Wrapped(wrapped) => wrapped
                .source
                .as_mut()
                .is_some_and(|source| source.has_next()),
        }
    }

    fn next_column(&mut self) -> Result<BackendColumn> {
        match self {
            Self::Empty => Err(Error::Exhausted),
            Self::Single(column) => column.take().ok_or(Error::Exhausted),
            Self::Wrapped(wrapped) => match wrapped.source.as_mut() {
                Some(source) => source.next_column(),
                None => Err(Error::Exhausted),
            },
        }
    }

    fn close(&mut self) -> Result<()> {
        match self {
            // Nothing owned.
            Self::Empty | Self::Single(_) => Ok(()),
            Self::Wrapped(wrapped) => wrapped.close(),
        }
    }

    fn position(&self) -> Option<Position> {
        // Discrete lookups (by id list, single key) have nothing to resume.
        None
    }
}

impl Iterator for BackendColumnIterator {
    type Item = Result<BackendColumn>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.next_column())
        } else {
            None
        }
    }
}

impl fmt::Debug for BackendColumnIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Single(column) => f.debug_tuple("Single").field(column).finish(),
            Self::Wrapped(wrapped) => f
                .debug_struct("Wrapped")
                .field("closed", &wrapped.is_closed())
                .finish(),
        }
    }
}

/// A range-scan cursor that tracks its continuation position.
///
/// The position is the name of the last column yielded. With a page limit,
/// the cursor reports exhaustion after that many columns even if the source
/// has more; the caller resumes with the position.
///
/// Resuming starts strictly after the position, so column names must be
/// unique within the scanned range. A source that yields several columns
/// under one name loses the ones after a page boundary that falls between
/// them.
pub struct PagedColumnIterator<S: ColumnSource> {
    source: S,
    page_limit: Option<usize>,
    last: Option<Bytes>,
    yielded: usize,
    base_offset: u64,
    closed: bool,
}

impl<S: ColumnSource> PagedColumnIterator<S> {
    /// Creates a paged cursor over `source` using the config's page limit.
    ///
    /// The source is expected to start at [`ScanConfig::start_key`] already.
    pub fn new(source: S, config: &ScanConfig) -> Self {
        Self {
            source,
            page_limit: config.page_limit,
            last: None,
            yielded: 0,
            base_offset: 0,
            closed: false,
        }
    }

    /// Continues the offset count of a previous page.
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.base_offset = offset;
        self
    }

    /// Returns true once the page limit has been reached.
    #[must_use]
    pub fn is_page_full(&self) -> bool {
        self.page_limit.is_some_and(|limit| self.yielded >= limit)
    }

    /// Returns the number of columns yielded by this cursor.
    #[must_use]
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Returns a token for the next page, if anything was yielded.
    #[must_use]
    pub fn page_state(&self) -> Option<PageState> {
        self.position()
            .map(|position| PageState::new(position, self.base_offset + self.yielded as u64))
    }
}

impl<S: ColumnSource> BackendIterator for PagedColumnIterator<S> {
    fn has_next(&mut self) -> bool {
        !self.closed && !self.is_page_full() && self.source.has_next()
    }

    fn next_column(&mut self) -> Result<BackendColumn> {
        if self.closed {
            return Err(Error::Exhausted);
        }
        if self.is_page_full() {
            tracing::trace!(yielded = self.yielded, "page limit reached");
            return Err(Error::Exhausted);
        }
        let column = self.source.next_column()?;
        self.last = Some(column.name.clone());
        self.yielded += 1;
        Ok(column)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        tracing::debug!(yielded = self.yielded, "releasing paged column source");
        self.source.close()
    }

    fn position(&self) -> Option<Position> {
        self.last.clone().map(Position::new)
    }
}

impl<S: ColumnSource> Iterator for PagedColumnIterator<S> {
    type Item = Result<BackendColumn>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.next_column())
        } else {
            None
        }
    }
}

impl<S: ColumnSource> Drop for PagedColumnIterator<S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("failed to release abandoned paged column source: {}", e);
        }
    }
}
