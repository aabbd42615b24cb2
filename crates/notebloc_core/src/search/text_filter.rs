//! Case-insensitive substring filter over note text.
//!
//! # Invariants
//! - Only `Note::text` is matched; tags are ignored.
//! - An empty query yields every note.
//! - Iterators are `Clone`, so a view can be replayed without re-querying.

use crate::model::note::Note;
use std::iter::FusedIterator;

/// Lazy filtered view yielding matching notes.
#[derive(Debug, Clone)]
pub struct NoteSearch<'a> {
    notes: &'a [Note],
    needle: String,
    cursor: usize,
}

impl<'a> NoteSearch<'a> {
    /// Builds a view over `notes` for `query`.
    pub fn new(notes: &'a [Note], query: &str) -> Self {
        Self {
            notes,
            needle: query.to_lowercase(),
            cursor: 0,
        }
    }

    /// Converts the view into one yielding `(collection_index, note)`.
    pub fn indexed(self) -> IndexedNoteSearch<'a> {
        IndexedNoteSearch { inner: self }
    }

    fn next_match(&mut self) -> Option<(usize, &'a Note)> {
        while self.cursor < self.notes.len() {
            let index = self.cursor;
            self.cursor += 1;
            let note = &self.notes[index];
            if note.matches_lowercase(&self.needle) {
                return Some((index, note));
            }
        }
        None
    }
}

impl<'a> Iterator for NoteSearch<'a> {
    type Item = &'a Note;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_match().map(|(_, note)| note)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.notes.len() - self.cursor))
    }
}

impl FusedIterator for NoteSearch<'_> {}

/// Filtered view yielding positions in the full collection.
#[derive(Debug, Clone)]
pub struct IndexedNoteSearch<'a> {
    inner: NoteSearch<'a>,
}

impl<'a> Iterator for IndexedNoteSearch<'a> {
    type Item = (usize, &'a Note);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_match()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl FusedIterator for IndexedNoteSearch<'_> {}
