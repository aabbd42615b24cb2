//! Terminal front end for notebloc.
//!
//! # Responsibility
//! - Map subcommands onto note session operations.
//! - Render the (optionally filtered) note list with collection indices.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::warn;
use notebloc_core::{
    init_logging, KeyValueStore, Note, NoteEvent, NoteSession, NoteStore, NoteStoreResult,
    RuntimeConfig, SqliteKeyValueStore,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notebloc")]
#[command(about = "Single-list notes with tags, completion and search")]
struct Cli {
    /// SQLite file holding the notes (overrides NOTEBLOC_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (overrides NOTEBLOC_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, optionally filtered by text
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a note
    Add {
        text: String,
        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Edit the note at INDEX; omitted fields keep their current value
    Edit {
        index: usize,
        #[arg(long)]
        text: Option<String>,
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Mark the note at INDEX as completed
    Complete { index: usize },
    /// Mark the note at INDEX as not completed
    Uncomplete { index: usize },
    /// Delete the note at INDEX
    Delete { index: usize },
    /// Print the database path
    Path,
    /// Print the core version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Logs go to files; a logging failure must not block note access.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    match cli.command.unwrap_or(Commands::List { search: None }) {
        Commands::Path => println!("{}", config.db_path.display()),
        Commands::Version => println!("notebloc {}", notebloc_core::core_version()),
        command => run_note_command(&config, command)?,
    }

    Ok(())
}

fn run_note_command(config: &RuntimeConfig, command: Commands) -> anyhow::Result<()> {
    let kv = SqliteKeyValueStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let mut session = NoteSession::new(NoteStore::open(kv));

    let result = match command {
        Commands::List { search } => {
            session.set_search_text(search.unwrap_or_default());
            print_notes(&session);
            return Ok(());
        }
        Commands::Add { text, tags } => {
            session.set_input_text(text);
            session.set_tags_text(tags);
            session.submit()
        }
        Commands::Edit { index, text, tags } => edit_note(&mut session, index, text, tags)?,
        Commands::Complete { index } => session.complete(index),
        Commands::Uncomplete { index } => session.uncomplete(index),
        Commands::Delete { index } => session.delete(index),
        Commands::Path | Commands::Version => return Ok(()),
    };

    report(result, &session)
}

/// Rewrites the note at `index`; a `None` field keeps the stored value.
fn edit_note<S: KeyValueStore>(
    session: &mut NoteSession<S>,
    index: usize,
    text: Option<String>,
    tags: Option<String>,
) -> anyhow::Result<NoteStoreResult<NoteEvent>> {
    if !session.edit(index) {
        bail!("no note at index {index}");
    }
    if let Some(text) = text {
        session.set_input_text(text);
    }
    match tags {
        Some(tags) => session.set_tags_text(tags),
        // Draft tags are joined with ", "; resubmitting them would add leading spaces.
        None => {
            let stored = session
                .store()
                .get(index)
                .map(|note| note.tags.join(","))
                .unwrap_or_default();
            session.set_tags_text(stored);
        }
    }
    Ok(session.submit())
}

fn report(
    result: NoteStoreResult<NoteEvent>,
    session: &NoteSession<SqliteKeyValueStore>,
) -> anyhow::Result<()> {
    let event = result?;
    println!("{}", event.message());
    if session.store().has_unsaved_changes() {
        warn!("event=cli_report module=cli status=error error_code=unsaved_changes");
        eprintln!("warning: change could not be saved to disk");
    }
    Ok(())
}

fn print_notes(session: &NoteSession<SqliteKeyValueStore>) {
    let mut shown = 0;
    for (index, note) in session.visible_notes() {
        println!("{}", render_note(index, note));
        shown += 1;
    }
    if shown == 0 {
        println!("No notes found.");
    }
}

fn render_note(index: usize, note: &Note) -> String {
    let mark = if note.completed { 'x' } else { ' ' };
    let tags = note.tags_text();
    if tags.trim().is_empty() {
        format!("{index:>3}. [{mark}] {}", note.text)
    } else {
        format!("{index:>3}. [{mark}] {}  ({tags})", note.text)
    }
}
