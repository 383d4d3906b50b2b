mod sqlite_store;

pub use sqlite_store::{SqliteStore, DEFAULT_DB_FILE, SEED_NOTES};
