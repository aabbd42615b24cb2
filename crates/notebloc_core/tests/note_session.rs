use notebloc_core::{
    EditState, MemoryKeyValueStore, NoteEvent, NoteSession, NoteStore, NoteStoreError,
    FEEDBACK_DURATION,
};
use std::time::Instant;

fn session() -> NoteSession<MemoryKeyValueStore> {
    NoteSession::new(NoteStore::new(MemoryKeyValueStore::new()))
}

fn submit(session: &mut NoteSession<MemoryKeyValueStore>, text: &str, tags: &str) -> NoteEvent {
    session.set_input_text(text);
    session.set_tags_text(tags);
    session.submit().unwrap()
}

#[test]
fn submit_while_idle_adds_and_clears_inputs() {
    let mut session = session();

    assert_eq!(submit(&mut session, "Buy milk", "errand,home"), NoteEvent::Added);
    assert_eq!(session.input_text(), "");
    assert_eq!(session.tags_text(), "");
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.feedback_message(), Some("Note added!"));
}

#[test]
fn submit_with_empty_input_keeps_state() {
    let mut session = session();
    session.set_tags_text("orphan");

    assert_eq!(session.submit().unwrap_err(), NoteStoreError::EmptyText);
    assert_eq!(session.tags_text(), "orphan");
    assert!(session.store().is_empty());
    assert_eq!(session.feedback_message(), None);
}

#[test]
fn edit_then_submit_updates_in_place() {
    let mut session = session();
    submit(&mut session, "Buy milk", "errand,home");
    session.complete(0).unwrap();

    assert!(session.edit(0));
    assert_eq!(session.edit_state(), EditState::Editing(0));
    assert_eq!(session.input_text(), "Buy milk");
    assert_eq!(session.tags_text(), "errand, home");

    assert_eq!(submit(&mut session, "Buy eggs", "errand"), NoteEvent::Edited);
    assert_eq!(session.edit_state(), EditState::Idle);
    assert_eq!(session.store().len(), 1);

    let note = &session.store().notes()[0];
    assert_eq!(note.text, "Buy eggs");
    assert_eq!(note.tags, vec!["errand"]);
    assert!(note.completed);
}

#[test]
fn resubmitting_edit_draft_keeps_literal_tag_spacing() {
    let mut session = session();
    submit(&mut session, "note", "a,b");

    session.edit(0);
    session.submit().unwrap();
    assert_eq!(session.store().notes()[0].tags, vec!["a", " b"]);
}

#[test]
fn update_requires_pending_edit() {
    let mut session = session();
    submit(&mut session, "note", "");
    session.set_input_text("other");

    assert_eq!(session.update().unwrap_err(), NoteStoreError::NoPendingEdit);
    assert_eq!(session.store().notes()[0].text, "note");
}

#[test]
fn edit_out_of_range_changes_nothing() {
    let mut session = session();
    session.set_input_text("draft");

    assert!(!session.edit(0));
    assert_eq!(session.edit_state(), EditState::Idle);
    assert_eq!(session.input_text(), "draft");
}

#[test]
fn starting_another_edit_replaces_pending_one() {
    let mut session = session();
    submit(&mut session, "first", "");
    submit(&mut session, "second", "");

    session.edit(0);
    session.edit(1);
    assert_eq!(session.edit_state(), EditState::Editing(1));
    assert_eq!(session.input_text(), "second");
}

#[test]
fn cancel_edit_returns_to_idle_so_submit_adds() {
    let mut session = session();
    submit(&mut session, "first", "");

    session.edit(0);
    session.cancel_edit();
    assert_eq!(session.edit_state(), EditState::Idle);
    assert_eq!(session.input_text(), "");

    assert_eq!(submit(&mut session, "second", ""), NoteEvent::Added);
    assert_eq!(session.store().len(), 2);
    assert_eq!(session.store().notes()[0].text, "first");
}

#[test]
fn deleting_before_pending_edit_retargets_it() {
    let mut session = session();
    for text in ["a", "b", "c"] {
        submit(&mut session, text, "");
    }

    session.edit(2);
    session.delete(0).unwrap();
    assert_eq!(session.edit_state(), EditState::Editing(1));

    submit(&mut session, "C2", "");
    let texts: Vec<&str> = session
        .store()
        .notes()
        .iter()
        .map(|note| note.text.as_str())
        .collect();
    assert_eq!(texts, vec!["b", "C2"]);
}

#[test]
fn deleting_pending_edit_target_cancels_edit() {
    let mut session = session();
    submit(&mut session, "a", "");
    submit(&mut session, "b", "");

    session.edit(1);
    session.delete(1).unwrap();
    assert_eq!(session.edit_state(), EditState::Idle);
    assert_eq!(session.input_text(), "");
}

#[test]
fn visible_notes_follow_search_text_with_collection_indices() {
    let mut session = session();
    for text in ["Buy milk", "Walk dog", "Milkshake"] {
        submit(&mut session, text, "");
    }

    session.set_search_text("milk");
    let visible: Vec<(usize, &str)> = session
        .visible_notes()
        .map(|(index, note)| (index, note.text.as_str()))
        .collect();
    assert_eq!(visible, vec![(0, "Buy milk"), (2, "Milkshake")]);

    session.set_search_text("");
    assert_eq!(session.visible_notes().count(), 3);
}

#[test]
fn feedback_follows_latest_mutation_and_expires() {
    let mut session = session();
    submit(&mut session, "task", "");
    session.complete(0).unwrap();
    assert_eq!(session.feedback_message(), Some("Note completed!"));

    session.uncomplete(0).unwrap();
    assert_eq!(session.feedback_message(), Some("Note uncompleted!"));

    let later = Instant::now() + FEEDBACK_DURATION;
    assert_eq!(session.feedback_message_at(later), None);
}

#[test]
fn rejected_operation_does_not_replace_feedback() {
    let mut session = session();
    submit(&mut session, "task", "");

    assert!(session.delete(9).is_err());
    assert_eq!(session.feedback_message(), Some("Note added!"));
}

#[test]
fn submitting_empty_text_while_editing_keeps_edit_open() {
    let mut session = session();
    submit(&mut session, "Buy milk", "errand,home");

    session.edit(0);
    session.set_input_text("");
    assert_eq!(session.submit().unwrap_err(), NoteStoreError::EmptyText);

    assert_eq!(session.edit_state(), EditState::Editing(0));
    assert_eq!(session.input_text(), "");
    assert_eq!(session.tags_text(), "errand, home");
    let note = &session.store().notes()[0];
    assert_eq!(note.text, "Buy milk");
    assert_eq!(note.tags, vec!["errand", "home"]);
    assert_eq!(session.feedback_message(), Some("Note added!"));
}
