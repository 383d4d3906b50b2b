use std::path::Path;

use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::entity::{coerce_done, Note, NoteDone};
use crate::error::Result;
use crate::server;
use crate::store::SqliteStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn done_marker(done: bool) -> char {
    if done {
        'x'
    } else {
        ' '
    }
}

fn print_note(note: &Note) {
    println!(
        "{:>3} [{}] {} - {}",
        note.id,
        done_marker(note.done),
        note.title.as_deref().unwrap_or_default(),
        note.content.as_deref().unwrap_or_default()
    );
}

pub fn handle_serve(config: ServerConfig) -> Result<()> {
    init_tracing();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(config))
}

pub fn handle_add(
    title: String,
    content: String,
    done: Option<String>,
    db: &Path,
    json: bool,
) -> Result<()> {
    let store = SqliteStore::open(db)?;

    let done = done.map(|d| coerce_done(&Value::String(d))).unwrap_or(false);
    let note = store.create(Some(title.as_str()), Some(content.as_str()), done)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {} - {}", note.id, title);
    }

    Ok(())
}

pub fn handle_list(db: &Path, json: bool) -> Result<()> {
    let store = SqliteStore::open(db)?;
    let notes = store.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }

    for note in &notes {
        print_note(note);
    }

    Ok(())
}

/// Toggle from the shell. Runs outside the server, so no `note_updated` is sent.
pub fn handle_toggle(id: i64, db: &Path, json: bool) -> Result<()> {
    let store = SqliteStore::open(db)?;
    let note = store.toggle_done(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&NoteDone::from(&note))?);
    } else {
        let state = if note.done { "done" } else { "not done" };
        println!("Note {} is now {}", note.id, state);
    }

    Ok(())
}
