//! Core use-case services.
//!
//! # Responsibility
//! - `note_store`: collection mutations and persistence.
//! - `note_session`: presentation state and submit routing.
//!
//! Both stay storage-agnostic through `KeyValueStore`.

pub mod note_session;
pub mod note_store;
