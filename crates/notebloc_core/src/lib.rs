//! Core domain logic for notebloc.
//! This crate is the single source of truth for note invariants; UI hosts
//! (FFI, CLI) only hold presentation state and call into it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;

pub use config::RuntimeConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{join_tags, split_tags, Note};
pub use repo::note_repo::{
    decode_notes, encode_notes, NoteBlobRepository, RepoError, RepoResult, NOTES_KEY,
};
pub use search::text_filter::{IndexedNoteSearch, NoteSearch};
pub use service::note_session::{EditState, Feedback, NoteSession, FEEDBACK_DURATION};
pub use service::note_store::{EditDraft, NoteEvent, NoteStore, NoteStoreError, NoteStoreResult};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
