//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical record stored in the note collection.
//! - Provide completion helpers and the literal tag split/join rules.
//!
//! # Invariants
//! - `text` is non-empty for every note created through the store.
//! - `tags` is exactly `split_tags(input)` of the last tag input.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};

/// Separator used by the comma-separated tag input.
pub const TAG_SEPARATOR: char = ',';

/// Separator used when a tag list is placed back into a text field.
pub const TAG_JOIN_SEPARATOR: &str = ", ";

/// One user-authored note.
///
/// Serialized field names are part of the persisted blob layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note body.
    pub text: String,
    /// Tags in input order, possibly containing empty strings.
    pub tags: Vec<String>,
    /// Completion flag toggled by complete/uncomplete.
    pub completed: bool,
}

impl Note {
    /// Creates an incomplete note, splitting `tags_input` literally.
    pub fn new(text: impl Into<String>, tags_input: &str) -> Self {
        Self {
            text: text.into(),
            tags: split_tags(tags_input),
            completed: false,
        }
    }

    /// Replaces text and tags, keeping the completion flag.
    pub fn rewrite(&mut self, text: impl Into<String>, tags_input: &str) {
        self.text = text.into();
        self.tags = split_tags(tags_input);
    }

    /// Marks the note as done.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Marks the note as not done.
    pub fn uncomplete(&mut self) {
        self.completed = false;
    }

    /// Returns the tag list in its editable text form.
    pub fn tags_text(&self) -> String {
        join_tags(&self.tags)
    }

    /// Case-insensitive substring match on `text`.
    ///
    /// `needle_lower` must already be lowercased; an empty needle matches.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.text.to_lowercase().contains(needle_lower)
    }
}

/// Splits tag input on `,` without trimming.
///
/// An empty input yields one empty tag, trailing commas yield trailing empty
/// tags and surrounding whitespace is preserved.
pub fn split_tags(input: &str) -> Vec<String> {
    input.split(TAG_SEPARATOR).map(str::to_string).collect()
}

/// Joins tags with `", "` for display in the tag input field.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_JOIN_SEPARATOR)
}
