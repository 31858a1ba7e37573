//! # graphos-backend
//!
//! The record layer every Graphos storage backend speaks.
//!
//! Backend adapters (key-value stores, column-family stores, relational
//! stores) read and write [`BackendEntry`] values made of binary
//! [`BackendColumn`]s, and stream scan results through a
//! [`BackendIterator`]. The query and schema layers above only ever see
//! these types. Depends only on `graphos-common`.
//!
//! ## Modules
//!
//! - [`store`] - Columns, entries, cursors, and page tokens
//! - [`config`] - Scan configuration
//!
//! ## Example
//!
//! ```
//! use graphos_backend::store::{BackendColumn, BackendColumnIterator, BackendIterator};
//!
//! let mut cursor = BackendColumnIterator::single(BackendColumn::of("name", "alice"));
//! while cursor.has_next() {
//!     let column = cursor.next_column()?;
//!     assert_eq!(column.value(), b"alice");
//! }
//! cursor.close()?;
//! # Ok::<(), graphos_common::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod store;

// Re-export commonly used types
pub use config::ScanConfig;
pub use store::{
    BackendColumn, BackendColumnIterator, BackendEntry, BackendIterator, BinaryEntry,
    ColumnSource, EntryAssembler, OlapEntry, PagedColumnIterator, Position,
};
