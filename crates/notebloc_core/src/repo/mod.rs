//! Repository layer over the key-value storage adapter.
//!
//! # Responsibility
//! - Map the note collection to and from its single persisted blob.
//! - Keep serialization details out of the note store.
//!
//! # Invariants
//! - The whole collection is always read and written as one value.
//! - Read and write failures stay distinguishable for the caller's logging.

pub mod note_repo;
