//! Utility functions and helpers.

pub mod bytes;
pub mod error;
