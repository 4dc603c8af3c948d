//! Store Module
//!
//! The authoritative word→description mapping.
//!
//! ## Responsibilities
//! - Own the persisted dictionary file (no other component touches it)
//! - Serialize mutations so concurrent adds/deletes never lose updates
//! - Serve reads from a consistent in-memory mirror

mod dictionary;

pub use dictionary::{normalize_word, Dictionary, DictionaryEntry};
