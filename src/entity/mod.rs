mod note;

pub use note::{coerce_done, NewNote, Note, NoteDone};
