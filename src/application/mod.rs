// src/application/mod.rs
pub mod controller;
pub mod note_service;
pub mod state;

pub use controller::NotesController;
pub use note_service::NoteService;
pub use state::{EditBuffer, EditSurface, LoadTicket, Notice, NoticeKind, NotesState};
