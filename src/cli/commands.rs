use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_HOST, DEFAULT_PORT};
use crate::store::DEFAULT_DB_FILE;

#[derive(Parser, Debug)]
#[command(name = "livenotes")]
#[command(version, about = "Note-taking web service with live done-flag updates")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web service
    Serve {
        /// Interface to bind
        #[arg(long, env = "LIVENOTES_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(long, short = 'p', env = "LIVENOTES_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// SQLite database file
        #[arg(long, env = "LIVENOTES_DB", default_value = DEFAULT_DB_FILE)]
        db: PathBuf,
    },

    /// Add a note
    Add {
        /// Note title
        title: String,

        /// Note content
        content: String,

        /// Initial done value (true, 1, yes, on count as done)
        #[arg(long)]
        done: Option<String>,

        /// SQLite database file
        #[arg(long, env = "LIVENOTES_DB", default_value = DEFAULT_DB_FILE)]
        db: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all notes
    List {
        /// SQLite database file
        #[arg(long, env = "LIVENOTES_DB", default_value = DEFAULT_DB_FILE)]
        db: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flip the done flag of a note
    Toggle {
        /// Note id
        id: i64,

        /// SQLite database file
        #[arg(long, env = "LIVENOTES_DB", default_value = DEFAULT_DB_FILE)]
        db: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
