//! Core type definitions for the Graphos backend.
//!
//! - Identifiers ([`Id`]) with a byte-comparable serialization
//! - Entity categories ([`EntityKind`])

mod entity_kind;
mod id;

pub use entity_kind::EntityKind;
pub use id::Id;
