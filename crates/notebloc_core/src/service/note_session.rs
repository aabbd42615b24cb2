//! Presentation-side session state over a note store.
//!
//! # Responsibility
//! - Hold the explicit UI state: input fields, search text, pending edit and
//!   the transient feedback message.
//! - Route "submit" to update while editing, else to add.
//!
//! # Invariants
//! - A pending edit always addresses the note it was started on, or is cleared.
//! - Feedback messages disappear `FEEDBACK_DURATION` after being shown.

use crate::search::text_filter::IndexedNoteSearch;
use crate::service::note_store::{NoteEvent, NoteStore, NoteStoreError, NoteStoreResult};
use crate::storage::KeyValueStore;
use log::debug;
use std::time::{Duration, Instant};

/// How long a confirmation stays visible.
pub const FEEDBACK_DURATION: Duration = Duration::from_secs(3);

/// Edit workflow state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(usize),
}

/// Transient confirmation message with a fixed visible duration.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    current: Option<(&'static str, Instant)>,
}

impl Feedback {
    /// Shows `message` from `now`, replacing any visible one.
    pub fn show(&mut self, message: &'static str, now: Instant) {
        self.current = Some((message, now));
    }

    /// Returns the visible message at `now`.
    pub fn current(&self, now: Instant) -> Option<&'static str> {
        self.current.and_then(|(message, shown_at)| {
            (now.saturating_duration_since(shown_at) < FEEDBACK_DURATION).then_some(message)
        })
    }
}

/// Single-screen note session: one store plus its UI state.
pub struct NoteSession<S: KeyValueStore> {
    store: NoteStore<S>,
    input_text: String,
    tags_text: String,
    search_text: String,
    edit_state: EditState,
    feedback: Feedback,
}

impl<S: KeyValueStore> NoteSession<S> {
    /// Wraps a store; UI state starts empty and idle.
    pub fn new(store: NoteStore<S>) -> Self {
        Self {
            store,
            input_text: String::new(),
            tags_text: String::new(),
            search_text: String::new(),
            edit_state: EditState::Idle,
            feedback: Feedback::default(),
        }
    }

    pub fn load(&mut self) {
        self.store.load();
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn set_tags_text(&mut self, tags: impl Into<String>) {
        self.tags_text = tags.into();
    }

    pub fn set_search_text(&mut self, query: impl Into<String>) {
        self.search_text = query.into();
    }

    /// Applies the input fields: update while editing, add otherwise.
    pub fn submit(&mut self) -> NoteStoreResult<NoteEvent> {
        let result = match self.edit_state {
            EditState::Editing(index) => {
                self.store.update(index, &self.input_text, &self.tags_text)
            }
            EditState::Idle => self.store.add(&self.input_text, &self.tags_text),
        };
        let event = self.confirm(result)?;
        self.clear_inputs();
        self.edit_state = EditState::Idle;
        Ok(event)
    }

    /// Applies the input fields to the pending edit only.
    ///
    /// Fails with `NoPendingEdit` when idle.
    pub fn update(&mut self) -> NoteStoreResult<NoteEvent> {
        match self.edit_state {
            EditState::Editing(_) => self.submit(),
            EditState::Idle => Err(NoteStoreError::NoPendingEdit),
        }
    }

    /// Loads the note at `index` into the input fields and starts editing it.
    ///
    /// Returns `false` and changes nothing if `index` is out of range.
    pub fn edit(&mut self, index: usize) -> bool {
        let Some(draft) = self.store.edit(index) else {
            debug!("event=note_edit module=session status=skipped reason=index_out_of_range");
            return false;
        };
        self.input_text = draft.text;
        self.tags_text = draft.tags;
        self.edit_state = EditState::Editing(draft.index);
        true
    }

    /// Abandons the pending edit and clears the input fields.
    pub fn cancel_edit(&mut self) {
        if self.edit_state != EditState::Idle {
            self.clear_inputs();
            self.edit_state = EditState::Idle;
        }
    }

    pub fn complete(&mut self, index: usize) -> NoteStoreResult<NoteEvent> {
        let result = self.store.complete(index);
        self.confirm(result)
    }

    pub fn uncomplete(&mut self, index: usize) -> NoteStoreResult<NoteEvent> {
        let result = self.store.uncomplete(index);
        self.confirm(result)
    }

    /// Deletes the note at `index`, keeping the pending edit on its note.
    pub fn delete(&mut self, index: usize) -> NoteStoreResult<NoteEvent> {
        let result = self.store.delete(index);
        let event = self.confirm(result)?;
        if let EditState::Editing(pending) = self.edit_state {
            if pending == index {
                self.clear_inputs();
                self.edit_state = EditState::Idle;
            } else if pending > index {
                self.edit_state = EditState::Editing(pending - 1);
            }
        }
        Ok(event)
    }

    /// Notes matching the current search text, with collection indices.
    pub fn visible_notes(&self) -> IndexedNoteSearch<'_> {
        self.store.search(&self.search_text).indexed()
    }

    /// Currently visible confirmation message.
    pub fn feedback_message(&self) -> Option<&'static str> {
        self.feedback_message_at(Instant::now())
    }

    pub fn feedback_message_at(&self, now: Instant) -> Option<&'static str> {
        self.feedback.current(now)
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NoteStore<S> {
        &mut self.store
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn tags_text(&self) -> &str {
        &self.tags_text
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn edit_state(&self) -> EditState {
        self.edit_state
    }

    fn confirm(&mut self, result: NoteStoreResult<NoteEvent>) -> NoteStoreResult<NoteEvent> {
        let event = result?;
        self.feedback.show(event.message(), Instant::now());
        Ok(event)
    }

    fn clear_inputs(&mut self) {
        self.input_text.clear();
        self.tags_text.clear();
    }
}
