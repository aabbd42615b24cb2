//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note screen operations to Dart via FRB.
//! - Own the single process-wide note session behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Indices are collection indices, as returned in `NoteItem::index`.
//! - Storage failures surface as `ok=false` envelopes, never as panics.

use log::{error, warn};
use notebloc_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditState, Note, NoteEvent, NoteSession, NoteStore, NoteStoreResult, RuntimeConfig,
    SqliteKeyValueStore,
};
use std::sync::{Mutex, MutexGuard, OnceLock};

type FfiSession = NoteSession<SqliteKeyValueStore>;

static SESSION: OnceLock<Mutex<Option<FfiSession>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One rendered note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    /// Collection index used to address follow-up operations.
    pub index: u32,
    pub text: String,
    pub tags: Vec<String>,
    pub completed: bool,
}

/// Visible note list for the current search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    pub items: Vec<NoteItem>,
    /// Size of the full, unfiltered collection.
    pub total: u32,
    /// Search text the list was filtered by.
    pub search_text: String,
    /// `true` while an edit is pending.
    pub editing: bool,
    pub message: String,
}

/// Result of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Confirmation on success, diagnostic on failure.
    pub message: String,
}

impl NoteActionResponse {
    fn from_result(action: &str, result: NoteStoreResult<NoteEvent>) -> Self {
        match result {
            Ok(event) => Self {
                ok: true,
                message: event.message().to_string(),
            },
            Err(err) => Self::failure(format!("{action} failed: {err}")),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Input-field contents after starting an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraftResponse {
    pub ok: bool,
    pub text: String,
    /// Tags joined with `", "`.
    pub tags: String,
    pub message: String,
}

/// Reloads notes from device storage and returns the visible list.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_load() -> NotesListResponse {
    with_session(|session| {
        session.load();
        list_response(session)
    })
    .unwrap_or_else(list_failure)
}

/// Returns notes matching the current search text.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    with_session(|session| list_response(session)).unwrap_or_else(list_failure)
}

/// Sets the search text and returns the filtered list.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_search(query: String) -> NotesListResponse {
    with_session(|session| {
        session.set_search_text(query);
        list_response(session)
    })
    .unwrap_or_else(list_failure)
}

/// Mirrors the note and tag input fields into the session.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_set_input(text: String, tags: String) -> NoteActionResponse {
    match with_session(|session| {
        session.set_input_text(text);
        session.set_tags_text(tags);
    }) {
        Ok(()) => NoteActionResponse {
            ok: true,
            message: String::new(),
        },
        Err(err) => NoteActionResponse::failure(err),
    }
}

/// Submits the input fields: update while editing, add otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_submit() -> NoteActionResponse {
    with_session(|session| NoteActionResponse::from_result("notes_submit", session.submit()))
        .unwrap_or_else(NoteActionResponse::failure)
}

/// Starts editing the note at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_edit(index: u32) -> NoteDraftResponse {
    let result = with_session(|session| {
        if session.edit(index as usize) {
            Ok((
                session.input_text().to_string(),
                session.tags_text().to_string(),
            ))
        } else {
            Err(format!("notes_edit failed: no note at index {index}"))
        }
    })
    .and_then(|inner| inner);

    match result {
        Ok((text, tags)) => NoteDraftResponse {
            ok: true,
            text,
            tags,
            message: String::new(),
        },
        Err(message) => NoteDraftResponse {
            ok: false,
            text: String::new(),
            tags: String::new(),
            message,
        },
    }
}

/// Abandons the pending edit, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_cancel_edit() -> NoteActionResponse {
    match with_session(|session| session.cancel_edit()) {
        Ok(()) => NoteActionResponse {
            ok: true,
            message: String::new(),
        },
        Err(err) => NoteActionResponse::failure(err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn notes_complete(index: u32) -> NoteActionResponse {
    with_session(|session| {
        NoteActionResponse::from_result("notes_complete", session.complete(index as usize))
    })
    .unwrap_or_else(NoteActionResponse::failure)
}

#[flutter_rust_bridge::frb(sync)]
pub fn notes_uncomplete(index: u32) -> NoteActionResponse {
    with_session(|session| {
        NoteActionResponse::from_result("notes_uncomplete", session.uncomplete(index as usize))
    })
    .unwrap_or_else(NoteActionResponse::failure)
}

#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(index: u32) -> NoteActionResponse {
    with_session(|session| {
        NoteActionResponse::from_result("notes_delete", session.delete(index as usize))
    })
    .unwrap_or_else(NoteActionResponse::failure)
}

/// Returns the confirmation message while it is still visible.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_feedback() -> Option<String> {
    with_session(|session| session.feedback_message().map(str::to_string))
        .ok()
        .flatten()
}

fn list_response(session: &FfiSession) -> NotesListResponse {
    let items: Vec<NoteItem> = session
        .visible_notes()
        .map(|(index, note)| to_note_item(index, note))
        .collect();
    let total = session.store().len() as u32;
    let message = if items.is_empty() {
        "No notes found.".to_string()
    } else {
        format!("Showing {} of {} note(s).", items.len(), total)
    };
    NotesListResponse {
        ok: true,
        items,
        total,
        search_text: session.search_text().to_string(),
        editing: session.edit_state() != EditState::Idle,
        message,
    }
}

fn list_failure(message: String) -> NotesListResponse {
    NotesListResponse {
        ok: false,
        items: Vec::new(),
        total: 0,
        search_text: String::new(),
        editing: false,
        message,
    }
}

fn to_note_item(index: usize, note: &Note) -> NoteItem {
    NoteItem {
        index: index as u32,
        text: note.text.clone(),
        tags: note.tags.clone(),
        completed: note.completed,
    }
}

/// Runs `f` against the process session, opening storage on first use.
fn with_session<T>(f: impl FnOnce(&mut FfiSession) -> T) -> Result<T, String> {
    let mut guard = lock_session();
    if guard.is_none() {
        *guard = Some(open_session()?);
    }
    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("note session unavailable".to_string()),
    }
}

fn lock_session() -> MutexGuard<'static, Option<FfiSession>> {
    let mutex = SESSION.get_or_init(|| Mutex::new(None));
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

#[cfg(not(test))]
fn session_config() -> RuntimeConfig {
    RuntimeConfig::from_env()
}

/// Unit tests share the process session; keep them off the user's database.
#[cfg(test)]
fn session_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env();
    config.db_path = std::env::temp_dir().join(format!(
        "notebloc-ffi-test-{}.sqlite3",
        std::process::id()
    ));
    config
}

fn open_session() -> Result<FfiSession, String> {
    let config = session_config();
    match SqliteKeyValueStore::open(&config.db_path) {
        Ok(kv) => Ok(NoteSession::new(NoteStore::open(kv))),
        Err(err) => {
            error!(
                "event=session_open module=ffi status=error error_code=storage_open_failed error={}",
                err
            );
            Err(format!("note storage open failed: {err}"))
        }
    }
}
