//! Groups a column cursor into entries.
//!
//! Range scans over prefixed key layouts return the columns of several
//! entries back to back. The assembler splits the stream wherever the id
//! changes, using the caller's id decoder, and closes the cursor once the
//! stream ends.

use std::collections::HashMap;

use graphos_common::types::{EntityKind, Id};
use graphos_common::utils::error::{Error, Result};

use super::column::BackendColumn;
use super::entry::{BackendEntry, BinaryEntry};
use super::iterator::BackendIterator;
use super::page::Position;

/// Builds [`BinaryEntry`] values from a cursor.
pub struct EntryAssembler<I, F> {
    cursor: I,
    kind: EntityKind,
    decode_id: F,
    pending: Option<BinaryEntry>,
    deferred: Option<Error>,
    finished: bool,
}

impl<I, F> EntryAssembler<I, F>
where
    I: BackendIterator,
    F: FnMut(&BackendColumn) -> Result<Id>,
{
    /// Creates an assembler producing entries of `kind`.
    ///
    /// `decode_id` extracts the owning entity id from a column name.
    pub fn new(cursor: I, kind: EntityKind, decode_id: F) -> Self {
        Self {
            cursor,
            kind,
            decode_id,
            pending: None,
            deferred: None,
            finished: false,
        }
    }

    /// Returns the next complete entry, or `None` when the cursor is drained.
    ///
    /// # Errors
    ///
    /// Returns cursor errors, id decoding errors (including an empty id), and
    /// the cursor's release failure when the stream ends. A release failure
    /// never discards the last entry: the entry is returned first and the
    /// failure on the following call.
    pub fn next_entry(&mut self) -> Result<Option<BinaryEntry>> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        if self.finished {
            return Ok(None);
        }
        while self.cursor.has_next() {
            let column = self.cursor.next_column()?;
            if let Some(entry) = self.pending.as_mut() {
                if entry.belong_to_me(&column) && (self.decode_id)(&column)? == *entry.id() {
                    entry.push_column(column);
                    continue;
                }
            }
            let fresh = self.start_entry(column)?;
            if let Some(done) = self.pending.replace(fresh) {
                return Ok(Some(done));
            }
        }
        self.finished = true;
        let last = self.pending.take();
        if let Err(err) = self.cursor.close() {
            if last.is_none() {
                return Err(err);
            }
            self.deferred = Some(err);
        }
        Ok(last)
    }

    /// Drains the cursor, merging entries whose columns were not contiguous.
    ///
    /// Entries are returned in order of first appearance.
    ///
    /// # Errors
    ///
    /// Same as [`next_entry`](Self::next_entry).
    pub fn collect_merged(mut self) -> Result<Vec<BinaryEntry>> {
        let mut entries: Vec<BinaryEntry> = Vec::new();
        let mut seen: HashMap<Id, usize> = HashMap::new();
        while let Some(entry) = self.next_entry()? {
            let existing = seen.get(entry.id()).copied();
            match existing {
                Some(index) => entries[index].merge(&entry)?,
                None => {
                    seen.insert(entry.id().clone(), entries.len());
                    entries.push(entry);
                }
            }
        }
        Ok(entries)
    }

    /// Returns where the underlying cursor stopped.
    pub fn position(&self) -> Option<Position> {
        self.cursor.position()
    }

    fn start_entry(&mut self, column: BackendColumn) -> Result<BinaryEntry> {
        let id = (self.decode_id)(&column)?;
        let mut entry = BinaryEntry::try_new(self.kind, id)?;
        if !entry.belong_to_me(&column) {
            return Err(Error::Encoding(format!(
                "column {column} is not prefixed by its decoded id {}",
                entry.id()
            )));
        }
        entry.push_column(column);
        Ok(entry)
    }
}

impl<I, F> Iterator for EntryAssembler<I, F>
where
    I: BackendIterator,
    F: FnMut(&BackendColumn) -> Result<Id>,
{
    type Item = Result<BinaryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}
