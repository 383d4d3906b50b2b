// src/entity/note.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::error::Category;
use serde_json::Value;

use crate::error::{NotesError, Result};

/// Tokens accepted as a true `done` value, compared case-insensitively.
const TRUE_TOKENS: [&str; 4] = ["true", "1", "yes", "on"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub done: bool,
}

/// The `{id, done}` view returned by a toggle and carried by `note_updated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDone {
    pub id: i64,
    pub done: bool,
}

impl From<&Note> for NoteDone {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            done: note.done,
        }
    }
}

/// Payload accepted by note creation.
///
/// `title` and `content` must be present but may be `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    #[serde(deserialize_with = "required_nullable")]
    pub title: Option<String>,
    #[serde(deserialize_with = "required_nullable")]
    pub content: Option<String>,
    #[serde(default)]
    pub done: Option<Value>,
}

impl NewNote {
    /// Parse a raw request body, reporting failures as `MalformedRequest`.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            let kind = match e.classify() {
                Category::Io => "IoError",
                Category::Syntax => "SyntaxError",
                Category::Data => "DataError",
                Category::Eof => "EofError",
            };
            NotesError::MalformedRequest(format!("{}: {}", kind, e))
        })
    }

    pub fn done(&self) -> bool {
        self.done.as_ref().map(coerce_done).unwrap_or(false)
    }
}

fn required_nullable<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// Coerce a loosely typed `done` value into a boolean.
///
/// Booleans pass through. Anything else is rendered as text, lower-cased and
/// matched against `true`, `1`, `yes` and `on`; all other values are false.
pub fn coerce_done(value: &Value) -> bool {
    let text = match value {
        Value::Bool(b) => return *b,
        Value::Null => return false,
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    };
    TRUE_TOKENS.contains(&text.as_str())
}
