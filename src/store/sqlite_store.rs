use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::entity::Note;
use crate::error::{NotesError, Result};

pub const DEFAULT_DB_FILE: &str = "notes.db";

/// Notes inserted into an empty table at startup: (title, content, done).
pub const SEED_NOTES: [(&str, &str, bool); 2] = [
    ("courses", "acheter des céréales", false),
    ("devoirs", "lire le cours de MMC", false),
];

/// SQLite-backed note store
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open or create the notes database
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let store = Self { conn, path: None };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS note (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                content TEXT,
                done BOOLEAN NOT NULL DEFAULT 0
            )",
            [],
        )?;

        Ok(())
    }

    /// Location of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert a note and return it with its assigned id.
    /// A `None` title or content is stored as NULL.
    pub fn create(&self, title: Option<&str>, content: Option<&str>, done: bool) -> Result<Note> {
        self.conn.execute(
            "INSERT INTO note (title, content, done) VALUES (?1, ?2, ?3)",
            params![title, content, done],
        )?;

        Ok(Note {
            id: self.conn.last_insert_rowid(),
            title: title.map(str::to_string),
            content: content.map(str::to_string),
            done,
        })
    }

    /// All notes in id order
    pub fn list(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, content, done FROM note ORDER BY id")?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn get(&self, id: i64) -> Result<Note> {
        self.conn
            .query_row(
                "SELECT id, title, content, done FROM note WHERE id = ?1",
                [id],
                note_from_row,
            )
            .optional()?
            .ok_or(NotesError::NoteNotFound(id))
    }

    /// Invert the done flag of a note and return the updated record
    pub fn toggle_done(&self, id: i64) -> Result<Note> {
        let changed = self
            .conn
            .execute("UPDATE note SET done = NOT done WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(NotesError::NoteNotFound(id));
        }

        self.get(id)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM note", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert the example notes when the table is empty.
    /// Returns true if anything was inserted.
    pub fn seed_if_empty(&self) -> Result<bool> {
        if self.count()? > 0 {
            return Ok(false);
        }

        for (title, content, done) in SEED_NOTES {
            self.create(Some(title), Some(content), done)?;
        }
        info!(count = SEED_NOTES.len(), "Seeded empty note table");

        Ok(true)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        done: row.get(3)?,
    })
}

impl From<rusqlite::Error> for NotesError {
    fn from(e: rusqlite::Error) -> Self {
        NotesError::Storage(format!("SQLite error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_db() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_DB_FILE);
        let store = SqliteStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), Some(path.as_path()));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = store.create(Some("courses"), Some("buy cereal"), false).unwrap();
        let second = store.create(Some("devoirs"), Some("read"), true).unwrap();

        assert_ne!(first.id, second.id);
        assert!(!first.done);
        assert!(second.done);
        assert_eq!(store.get(first.id).unwrap(), first);
        assert_eq!(store.get(second.id).unwrap(), second);
    }

    #[test]
    fn test_list_in_id_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for i in 0..3 {
            store.create(Some(format!("note {}", i).as_str()), Some("body"), false).unwrap();
        }

        let notes = store.list().unwrap();
        assert_eq!(notes.len(), 3);
        assert!(notes.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(notes[0].title.as_deref(), Some("note 0"));
    }

    #[test]
    fn test_toggle_done_persists() {
        let store = SqliteStore::open_in_memory().unwrap();
        let note = store.create(Some("a"), Some("b"), false).unwrap();

        let toggled = store.toggle_done(note.id).unwrap();
        assert!(toggled.done);
        assert!(store.list().unwrap()[0].done);

        let toggled = store.toggle_done(note.id).unwrap();
        assert!(!toggled.done);
        assert!(!store.get(note.id).unwrap().done);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        let note = store.create(Some("a"), Some("b"), false).unwrap();

        let err = store.toggle_done(note.id + 100).unwrap_err();
        assert!(matches!(err, NotesError::NoteNotFound(id) if id == note.id + 100));
        assert_eq!(store.list().unwrap(), vec![note]);
    }

    #[test]
    fn test_create_with_null_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let note = store.create(None, Some("body"), false).unwrap();
        assert_eq!(note.title, None);

        let stored = store.get(note.id).unwrap();
        assert_eq!(stored.title, None);
        assert_eq!(stored.content.as_deref(), Some("body"));
    }

    #[test]
    fn test_get_unknown_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(store.get(1), Err(NotesError::NoteNotFound(1))));
    }

    #[test]
    fn test_seed_only_when_empty() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert!(store.seed_if_empty().unwrap());
        assert_eq!(store.count().unwrap(), SEED_NOTES.len());
        assert_eq!(store.list().unwrap()[0].title.as_deref(), Some("courses"));

        assert!(!store.seed_if_empty().unwrap());
        assert_eq!(store.count().unwrap(), SEED_NOTES.len());
    }

    #[test]
    fn test_reopen_keeps_notes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_DB_FILE);

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            let note = store.create(Some("kept"), Some("across opens"), false).unwrap();
            store.toggle_done(note.id).unwrap();
            note.id
        };

        let store = SqliteStore::open(&path).unwrap();
        let note = store.get(id).unwrap();
        assert_eq!(note.title.as_deref(), Some("kept"));
        assert!(note.done);
        assert!(!store.seed_if_empty().unwrap());
    }
}
