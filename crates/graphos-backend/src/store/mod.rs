//! Backend storage records and scan cursors.
//!
//! - [`column`] - Binary name/value columns
//! - [`entry`] - Entries grouping the columns of one entity
//! - [`iterator`] - Cursors streaming columns out of a backend
//! - [`page`] - Continuation tokens for paged scans
//! - [`assemble`] - Turning a cursor back into entries
//!
//! Entries and cursors do not depend on each other; only [`assemble`]
//! combines them.

pub mod assemble;
pub mod column;
pub mod entry;
pub mod iterator;
pub mod page;

pub use assemble::EntryAssembler;
pub use column::{BackendColumn, sort_columns};
pub use entry::{BackendEntry, BinaryEntry, OlapEntry};
pub use iterator::{
    BackendColumnIterator, BackendIterator, ColumnSource, IterSource, PagedColumnIterator,
};
pub use page::{PageState, Position};
