//! Note store: the in-memory collection and its persisted mirror.
//!
//! # Responsibility
//! - Own the ordered note collection and every mutation on it.
//! - Persist the full collection after each successful mutation.
//! - Expose read accessors and the search view for rendering.
//!
//! # Invariants
//! - Notes are addressed by position; an out-of-range index is a no-op error.
//! - A mutation is applied in memory even when persisting it fails.
//! - Every save writes the current collection, never an older snapshot.
//! - Note text is never written to logs.

use crate::model::note::Note;
use crate::repo::note_repo::NoteBlobRepository;
use crate::search::text_filter::NoteSearch;
use crate::storage::KeyValueStore;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type NoteStoreResult<T> = Result<T, NoteStoreError>;

/// Rejected note operation. The collection is unchanged when returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    /// `add`/`update` called with empty note text.
    EmptyText,
    /// Index does not address a note in the current collection.
    IndexOutOfRange { index: usize, len: usize },
    /// `submit` routed to update without a pending edit.
    NoPendingEdit,
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text cannot be empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} out of range for {len} note(s)")
            }
            Self::NoPendingEdit => write!(f, "no note is being edited"),
        }
    }
}

impl Error for NoteStoreError {}

impl NoteStoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty_text",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::NoPendingEdit => "no_pending_edit",
        }
    }
}

/// Confirmation emitted by each successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    Added,
    Completed,
    Uncompleted,
    Deleted,
    Edited,
}

impl NoteEvent {
    /// Short human-readable confirmation for the UI.
    pub fn message(self) -> &'static str {
        match self {
            Self::Added => "Note added!",
            Self::Completed => "Note completed!",
            Self::Uncompleted => "Note uncompleted!",
            Self::Deleted => "Note deleted!",
            Self::Edited => "Note edited!",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Added => "note_add",
            Self::Completed => "note_complete",
            Self::Uncompleted => "note_uncomplete",
            Self::Deleted => "note_delete",
            Self::Edited => "note_update",
        }
    }
}

/// Input-field contents for editing one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Collection index the draft was taken from.
    pub index: usize,
    pub text: String,
    /// Tags joined with `", "`.
    pub tags: String,
}

/// In-memory note collection backed by a key-value store.
pub struct NoteStore<S: KeyValueStore> {
    notes: Vec<Note>,
    repo: NoteBlobRepository<S>,
    unsaved: bool,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Creates an empty store; call [`NoteStore::load`] to read persisted notes.
    pub fn new(store: S) -> Self {
        Self {
            notes: Vec::new(),
            repo: NoteBlobRepository::new(store),
            unsaved: false,
        }
    }

    /// Creates a store and immediately loads persisted notes.
    pub fn open(store: S) -> Self {
        let mut note_store = Self::new(store);
        note_store.load();
        note_store
    }

    /// Replaces the collection with the persisted one.
    ///
    /// An absent blob, a read failure or a corrupt blob leaves the current
    /// collection untouched; failures are logged only.
    pub fn load(&mut self) {
        match self.repo.load() {
            Ok(Some(notes)) => {
                info!(
                    "event=notes_load module=service status=ok count={}",
                    notes.len()
                );
                self.notes = notes;
                self.unsaved = false;
            }
            Ok(None) => {
                info!("event=notes_load module=service status=ok count=0 blob=absent");
            }
            Err(err) => {
                error!(
                    "event=notes_load module=service status=error error_code={} error={}",
                    err.code(),
                    err
                );
            }
        }
    }

    /// Appends a new incomplete note.
    pub fn add(&mut self, text: &str, tags_input: &str) -> NoteStoreResult<NoteEvent> {
        if text.is_empty() {
            return self.reject(NoteEvent::Added, NoteStoreError::EmptyText);
        }
        self.notes.push(Note::new(text, tags_input));
        Ok(self.commit(NoteEvent::Added))
    }

    /// Returns the editable form of the note at `index`. Does not persist.
    pub fn edit(&self, index: usize) -> Option<EditDraft> {
        self.notes.get(index).map(|note| EditDraft {
            index,
            text: note.text.clone(),
            tags: note.tags_text(),
        })
    }

    /// Overwrites text and tags of the note at `index`, keeping `completed`.
    pub fn update(
        &mut self,
        index: usize,
        text: &str,
        tags_input: &str,
    ) -> NoteStoreResult<NoteEvent> {
        if text.is_empty() {
            return self.reject(NoteEvent::Edited, NoteStoreError::EmptyText);
        }
        self.check_index(NoteEvent::Edited, index)?;
        self.notes[index].rewrite(text, tags_input);
        Ok(self.commit(NoteEvent::Edited))
    }

    /// Marks the note at `index` as done. Idempotent.
    pub fn complete(&mut self, index: usize) -> NoteStoreResult<NoteEvent> {
        self.set_completed(index, true)
    }

    /// Marks the note at `index` as not done. Idempotent.
    pub fn uncomplete(&mut self, index: usize) -> NoteStoreResult<NoteEvent> {
        self.set_completed(index, false)
    }

    /// Removes the note at `index`; later notes shift down by one.
    pub fn delete(&mut self, index: usize) -> NoteStoreResult<NoteEvent> {
        self.check_index(NoteEvent::Deleted, index)?;
        self.notes.remove(index);
        Ok(self.commit(NoteEvent::Deleted))
    }

    /// Lazy view of notes whose text contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> NoteSearch<'_> {
        NoteSearch::new(&self.notes, query)
    }

    /// Full current collection in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// `true` when the latest persistence attempt failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Retries persisting the current collection.
    ///
    /// Returns whether storage now mirrors memory.
    pub fn flush(&mut self) -> bool {
        self.persist("notes_flush");
        !self.unsaved
    }

    pub fn storage(&self) -> &S {
        self.repo.store()
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.repo.store_mut()
    }

    fn set_completed(&mut self, index: usize, completed: bool) -> NoteStoreResult<NoteEvent> {
        let event = if completed {
            NoteEvent::Completed
        } else {
            NoteEvent::Uncompleted
        };
        self.check_index(event, index)?;
        let note = &mut self.notes[index];
        if completed {
            note.complete();
        } else {
            note.uncomplete();
        }
        Ok(self.commit(event))
    }

    fn check_index(&self, event: NoteEvent, index: usize) -> NoteStoreResult<()> {
        let len = self.notes.len();
        if index < len {
            Ok(())
        } else {
            self.reject(event, NoteStoreError::IndexOutOfRange { index, len })
        }
    }

    fn commit(&mut self, event: NoteEvent) -> NoteEvent {
        self.persist(event.label());
        event
    }

    fn persist(&mut self, event_name: &str) {
        match self.repo.save(&self.notes) {
            Ok(()) => {
                self.unsaved = false;
                info!(
                    "event={event_name} module=service status=ok count={}",
                    self.notes.len()
                );
            }
            Err(err) => {
                self.unsaved = true;
                error!(
                    "event={event_name} module=service status=error error_code={} count={} error={}",
                    err.code(),
                    self.notes.len(),
                    err
                );
            }
        }
    }

    fn reject<T>(&self, event: NoteEvent, err: NoteStoreError) -> NoteStoreResult<T> {
        warn!(
            "event={} module=service status=skipped reason={} count={}",
            event.label(),
            err.code(),
            self.notes.len()
        );
        Err(err)
    }
}
