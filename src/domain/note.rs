// src/domain/note.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Request body for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Presence check only: the empty string is the sole rejected value
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }
}
