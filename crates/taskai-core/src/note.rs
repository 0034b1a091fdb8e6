use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Newest notes come first.
pub fn prepend(notes: &[Note], note: Note) -> Vec<Note> {
    let mut next = Vec::with_capacity(notes.len() + 1);
    next.push(note);
    next.extend_from_slice(notes);
    next
}

pub fn remove(notes: &[Note], id: Uuid) -> Vec<Note> {
    notes.iter().filter(|note| note.id != id).cloned().collect()
}

/// Text block handed to the summarizer when every note is summarized at once.
pub fn digest(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|note| format!("Title: {}\nContent: {}", note.title, note.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
