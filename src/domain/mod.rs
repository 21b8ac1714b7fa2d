// src/domain/mod.rs
pub mod error;
pub mod note;

pub use error::DomainError;
pub use note::{Note, NoteInput};
