//! Server-rendered notes page and its browser script.

use crate::entity::Note;

/// Script served at `/static/script.js`.
pub const NOTES_SCRIPT: &str = include_str!("../../assets/notes.js");

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Notes</title>
<style>
  body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
  .note { border: 1px solid #ccc; border-radius: 4px; padding: 0.5rem 1rem; margin-bottom: 0.5rem; }
  .note.done h2, .note.done p { text-decoration: line-through; color: #888; }
  .note h2 { font-size: 1.1rem; margin: 0.25rem 0; }
</style>
</head>
<body>
<h1>Notes</h1>
"#;

const PAGE_TAIL: &str = r#"<script src="/static/script.js"></script>
</body>
</html>
"#;

pub fn render_notes_page(notes: &[Note]) -> String {
    let mut html = String::from(PAGE_HEAD);

    if notes.is_empty() {
        html.push_str("<p class=\"empty\">No notes yet.</p>\n");
    }

    for note in notes {
        let done_class = if note.done { " done" } else { "" };
        let checked = if note.done { " checked" } else { "" };
        html.push_str(&format!(
            "<div class=\"note{}\" id=\"note-{}\">\n\
             <label><input type=\"checkbox\" class=\"done-toggle\" data-id=\"{}\"{}> done</label>\n\
             <h2>{}</h2>\n\
             <p>{}</p>\n\
             </div>\n",
            done_class,
            note.id,
            note.id,
            checked,
            escape_html(note.title.as_deref().unwrap_or_default()),
            escape_html(note.content.as_deref().unwrap_or_default()),
        ));
    }

    html.push_str(PAGE_TAIL);
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
