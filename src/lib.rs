pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod realtime;
pub mod server;
pub mod store;

pub use config::ServerConfig;
pub use entity::Note;
pub use error::{NotesError, Result};
pub use realtime::{Broadcaster, NoteEvent};
pub use server::AppState;
pub use store::SqliteStore;
