// src/application/note_service.rs
use crate::domain::{DomainError, Note, NoteInput};

/// Remote note store as seen by the controller.
///
/// Implementations map every non-success outcome to a [`DomainError`]; the
/// controller never inspects transport details.
pub trait NoteService {
    /// Full collection, in the order the service returns it
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError>;

    fn get_note(&mut self, id: i64) -> Result<Note, DomainError>;

    /// Create a note; the service assigns the id
    fn create_note(&mut self, input: &NoteInput) -> Result<Note, DomainError>;

    fn update_note(&mut self, id: i64, input: &NoteInput) -> Result<Note, DomainError>;

    fn delete_note(&mut self, id: i64) -> Result<(), DomainError>;
}

impl<S: NoteService + ?Sized> NoteService for &mut S {
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        (**self).list_notes()
    }

    fn get_note(&mut self, id: i64) -> Result<Note, DomainError> {
        (**self).get_note(id)
    }

    fn create_note(&mut self, input: &NoteInput) -> Result<Note, DomainError> {
        (**self).create_note(input)
    }

    fn update_note(&mut self, id: i64, input: &NoteInput) -> Result<Note, DomainError> {
        (**self).update_note(id, input)
    }

    fn delete_note(&mut self, id: i64) -> Result<(), DomainError> {
        (**self).delete_note(id)
    }
}
