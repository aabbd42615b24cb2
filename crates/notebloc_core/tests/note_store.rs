use notebloc_core::{
    decode_notes, KeyValueStore, MemoryKeyValueStore, Note, NoteEvent, NoteStore,
    NoteStoreError, StorageError, StorageResult, NOTES_KEY,
};

fn store_with(texts: &[&str]) -> NoteStore<MemoryKeyValueStore> {
    let mut store = NoteStore::new(MemoryKeyValueStore::new());
    for text in texts {
        store.add(text, "").unwrap();
    }
    store
}

fn persisted(store: &NoteStore<MemoryKeyValueStore>) -> Vec<Note> {
    decode_notes(store.storage().raw(NOTES_KEY).unwrap()).unwrap()
}

fn texts(store: &NoteStore<MemoryKeyValueStore>) -> Vec<&str> {
    store.notes().iter().map(|note| note.text.as_str()).collect()
}

#[test]
fn add_appends_incomplete_note_and_persists() {
    let mut store = store_with(&["first"]);

    let event = store.add("Buy milk", "errand,home").unwrap();
    assert_eq!(event, NoteEvent::Added);
    assert_eq!(event.message(), "Note added!");
    assert_eq!(store.len(), 2);

    let last = store.get(1).unwrap();
    assert_eq!(last.text, "Buy milk");
    assert_eq!(last.tags, vec!["errand", "home"]);
    assert!(!last.completed);
    assert_eq!(persisted(&store), store.notes());
}

#[test]
fn add_with_empty_text_is_a_no_op() {
    let mut store = store_with(&["only"]);

    let err = store.add("", "tag").unwrap_err();
    assert_eq!(err, NoteStoreError::EmptyText);
    assert_eq!(texts(&store), vec!["only"]);
}

#[test]
fn add_with_empty_tag_input_stores_one_empty_tag() {
    let mut store = store_with(&[]);
    store.add("no tags", "").unwrap();
    assert_eq!(store.notes()[0].tags, vec![""]);
    assert_eq!(persisted(&store)[0].tags, vec![""]);
}

#[test]
fn delete_removes_one_note_and_shifts_later_ones() {
    let mut store = store_with(&["a", "b", "c", "d"]);

    assert_eq!(store.delete(1).unwrap(), NoteEvent::Deleted);
    assert_eq!(texts(&store), vec!["a", "c", "d"]);
    assert_eq!(persisted(&store).len(), 3);
}

#[test]
fn out_of_range_index_is_rejected_without_change() {
    let mut store = store_with(&["a"]);
    let before = store.notes().to_vec();

    for result in [
        store.complete(1),
        store.uncomplete(5),
        store.delete(1),
        store.update(3, "x", "y"),
    ] {
        assert!(matches!(
            result,
            Err(NoteStoreError::IndexOutOfRange { len: 1, .. })
        ));
    }
    assert_eq!(store.notes(), before.as_slice());
}

#[test]
fn complete_and_uncomplete_are_idempotent() {
    let mut store = store_with(&[]);
    store.add("task", "x,y").unwrap();

    store.complete(0).unwrap();
    let once = store.notes().to_vec();
    assert_eq!(store.complete(0).unwrap(), NoteEvent::Completed);
    assert_eq!(store.notes(), once.as_slice());
    assert!(store.notes()[0].completed);

    assert_eq!(store.uncomplete(0).unwrap(), NoteEvent::Uncompleted);
    store.uncomplete(0).unwrap();
    let note = &store.notes()[0];
    assert!(!note.completed);
    assert_eq!(note.text, "task");
    assert_eq!(note.tags, vec!["x", "y"]);
}

#[test]
fn edit_then_update_rewrites_only_target_note() {
    let mut store = store_with(&["a", "b", "c"]);

    let draft = store.edit(1).unwrap();
    assert_eq!(draft.index, 1);
    assert_eq!(draft.text, "b");
    assert_eq!(draft.tags, "");

    assert_eq!(store.update(1, "B2", "p,q").unwrap(), NoteEvent::Edited);
    assert_eq!(texts(&store), vec!["a", "B2", "c"]);
    assert_eq!(store.notes()[1].tags, vec!["p", "q"]);
    assert_eq!(store.notes()[0].tags, vec![""]);
    assert_eq!(persisted(&store), store.notes());
}

#[test]
fn edit_joins_tags_with_comma_space() {
    let mut store = store_with(&[]);
    store.add("tagged", "errand,home").unwrap();
    assert_eq!(store.edit(0).unwrap().tags, "errand, home");
}

#[test]
fn search_returns_matching_subsequence_in_order() {
    let store = store_with(&["Buy milk", "call Bob", "Milk the cow", "bobsled"]);

    let hits: Vec<&str> = store.search("MILK").map(|n| n.text.as_str()).collect();
    assert_eq!(hits, vec!["Buy milk", "Milk the cow"]);

    let indexed: Vec<usize> = store.search("bob").indexed().map(|(i, _)| i).collect();
    assert_eq!(indexed, vec![1, 3]);

    let all: Vec<&Note> = store.search("").collect();
    assert_eq!(all.len(), 4);
    assert_eq!(texts(&store), vec!["Buy milk", "call Bob", "Milk the cow", "bobsled"]);
}

#[test]
fn buy_milk_scenario() {
    let mut store = NoteStore::new(MemoryKeyValueStore::new());

    store.add("Buy milk", "errand,home").unwrap();
    assert_eq!(
        store.notes(),
        &[Note {
            text: "Buy milk".to_string(),
            tags: vec!["errand".to_string(), "home".to_string()],
            completed: false,
        }]
    );

    store.complete(0).unwrap();
    assert!(store.notes()[0].completed);
    assert_eq!(store.search("milk").count(), 1);
    assert_eq!(store.search("eggs").count(), 0);

    let draft = store.edit(0).unwrap();
    store.update(draft.index, "Buy eggs", "errand").unwrap();
    assert_eq!(
        store.notes()[0],
        Note {
            text: "Buy eggs".to_string(),
            tags: vec!["errand".to_string()],
            completed: true,
        }
    );

    store.delete(0).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.search("eggs").count(), 0);
    assert_eq!(persisted(&store), Vec::<Note>::new());
}

#[test]
fn open_loads_persisted_collection() {
    let mut first = store_with(&["kept"]);
    first.complete(0).unwrap();
    let backing = first.storage().clone();

    let reopened = NoteStore::open(backing);
    assert_eq!(reopened.notes(), first.notes());
}

#[test]
fn corrupt_blob_leaves_collection_empty() {
    let store = NoteStore::open(MemoryKeyValueStore::with_entry(NOTES_KEY, "not json"));
    assert!(store.is_empty());
    assert!(!store.has_unsaved_changes());
}

#[test]
fn failed_load_keeps_current_collection() {
    let mut store = store_with(&["in memory"]);
    store
        .storage_mut()
        .set(NOTES_KEY, r#"[{"text":1}]"#)
        .unwrap();

    store.load();
    assert_eq!(texts(&store), vec!["in memory"]);
}

/// Store whose writes fail until `healthy` is set.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryKeyValueStore,
    healthy: bool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if !self.healthy {
            return Err(StorageError::MissingTable("kv_entries"));
        }
        self.inner.set(key, value)
    }
}

#[test]
fn write_failure_keeps_mutation_and_marks_unsaved() {
    let mut store = NoteStore::new(FlakyStore::default());

    assert_eq!(store.add("survives", "").unwrap(), NoteEvent::Added);
    assert_eq!(store.len(), 1);
    assert!(store.has_unsaved_changes());
    assert_eq!(store.storage().inner.raw(NOTES_KEY), None);

    store.storage_mut().healthy = true;
    store.add("second", "").unwrap();
    assert!(!store.has_unsaved_changes());

    let saved = decode_notes(store.storage().inner.raw(NOTES_KEY).unwrap()).unwrap();
    assert_eq!(saved, store.notes());
}

#[test]
fn flush_retries_persisting_latest_collection() {
    let mut store = NoteStore::new(FlakyStore::default());
    store.add("pending", "a").unwrap();
    assert!(!store.flush());

    store.storage_mut().healthy = true;
    assert!(store.flush());
    let saved = decode_notes(store.storage().inner.raw(NOTES_KEY).unwrap()).unwrap();
    assert_eq!(saved, store.notes());
}
