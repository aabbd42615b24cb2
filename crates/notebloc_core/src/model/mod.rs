//! Domain model for notes.
//!
//! # Responsibility
//! - Define the note entity persisted as one collection blob.
//! - Own the literal tag split/join rules shared by store and UI.
//!
//! # Invariants
//! - A note has no identity beyond its position in the collection.
//! - Tag strings are stored exactly as split, never trimmed or deduplicated.

pub mod note;
