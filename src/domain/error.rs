// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Title and content required")]
    FieldsRequired,
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
    #[error("Note service unreachable: {0}")]
    Unreachable(String),
    #[error("Note service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Malformed response from note service: {0}")]
    MalformedResponse(String),
}
