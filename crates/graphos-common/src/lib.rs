//! # graphos-common
//!
//! Foundation layer for the Graphos backend: identifiers, entity kinds, and
//! byte utilities.
//!
//! This crate provides the building blocks shared by every backend adapter.
//! It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (Id, EntityKind)
//! - [`utils`] - Utility functions and helpers (bytes, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{EntityKind, Id};
pub use utils::error::{Error, Result};
