//! Note collection blob repository and JSON codec.
//!
//! # Responsibility
//! - Persist the full note collection under the fixed `notes` key.
//! - Encode/decode the `[{text, tags, completed}]` JSON layout.
//!
//! # Invariants
//! - `decode_notes(encode_notes(c)) == c` for every collection.
//! - A missing key is `Ok(None)`, never an error.

use crate::model::note::Note;
use crate::storage::{KeyValueStore, StorageError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for blob persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Storage read failed.
    Read(StorageError),
    /// Storage write failed.
    Write(StorageError),
    /// Persisted blob is not a valid note collection.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read notes blob: {err}"),
            Self::Write(err) => write!(f, "failed to write notes blob: {err}"),
            Self::Decode(err) => write!(f, "invalid persisted notes blob: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl RepoError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "storage_read_failed",
            Self::Write(_) => "storage_write_failed",
            Self::Decode(_) => "blob_decode_failed",
            Self::Encode(_) => "blob_encode_failed",
        }
    }
}

/// Serializes a note collection to the persisted JSON layout.
pub fn encode_notes(notes: &[Note]) -> RepoResult<String> {
    serde_json::to_string(notes).map_err(RepoError::Encode)
}

/// Parses a persisted JSON blob into a note collection.
pub fn decode_notes(blob: &str) -> RepoResult<Vec<Note>> {
    serde_json::from_str(blob).map_err(RepoError::Decode)
}

/// Fixed-key blob slot for the note collection.
pub struct NoteBlobRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> NoteBlobRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the persisted collection; `Ok(None)` if never saved.
    pub fn load(&self) -> RepoResult<Option<Vec<Note>>> {
        let Some(blob) = self.store.get(NOTES_KEY).map_err(RepoError::Read)? else {
            return Ok(None);
        };
        decode_notes(&blob).map(Some)
    }

    /// Overwrites the persisted collection with `notes`.
    pub fn save(&mut self, notes: &[Note]) -> RepoResult<()> {
        let blob = encode_notes(notes)?;
        self.store
            .set(NOTES_KEY, &blob)
            .map_err(RepoError::Write)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
