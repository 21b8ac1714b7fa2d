// src/util/testing.rs

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteService;
use crate::domain::{DomainError, Note, NoteInput};

/// One call received by [`MockNoteService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Get(i64),
    Create(NoteInput),
    Update(i64, NoteInput),
    Delete(i64),
}

/// In-memory stand-in for the remote note service
///
/// Behaves like the real service (ids assigned on creation, 404 for unknown
/// ids, list ordered by id) and records every call it receives, so tests can
/// assert that a code path sent no request at all. Failures can be injected
/// per operation.
///
/// # Examples
///
/// ```
/// use notesync::application::NoteService;
/// use notesync::util::testing::{MockNoteService, Request};
///
/// let mut mock = MockNoteService::builder()
///     .with_note(1, "Groceries", "milk, eggs")
///     .build();
///
/// let notes = mock.list_notes().unwrap();
/// assert_eq!(notes.len(), 1);
/// assert_eq!(mock.requests(), &[Request::List]);
/// ```
pub struct MockNoteService {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
    requests: Vec<Request>,
    list_failure: Option<DomainError>,
    create_failure: Option<DomainError>,
    update_failure: Option<DomainError>,
    delete_failure: Option<DomainError>,
}

impl MockNoteService {
    pub fn builder() -> MockNoteServiceBuilder {
        MockNoteServiceBuilder::new()
    }

    /// Every call received so far, oldest first
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Make every following list call fail with `error`
    pub fn fail_list(&mut self, error: DomainError) {
        self.list_failure = Some(error);
    }

    pub fn fail_create(&mut self, error: DomainError) {
        self.create_failure = Some(error);
    }

    pub fn fail_update(&mut self, error: DomainError) {
        self.update_failure = Some(error);
    }

    pub fn fail_delete(&mut self, error: DomainError) {
        self.delete_failure = Some(error);
    }

    /// Clear all injected failures
    pub fn recover(&mut self) {
        self.list_failure = None;
        self.create_failure = None;
        self.update_failure = None;
        self.delete_failure = None;
    }

    /// Remove a note behind the client's back, as another client would
    pub fn remove(&mut self, id: i64) {
        self.notes.remove(&id);
    }
}

impl NoteService for MockNoteService {
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        self.requests.push(Request::List);
        if let Some(e) = &self.list_failure {
            return Err(e.clone());
        }
        Ok(self.notes.values().cloned().collect())
    }

    fn get_note(&mut self, id: i64) -> Result<Note, DomainError> {
        self.requests.push(Request::Get(id));
        self.notes
            .get(&id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))
    }

    fn create_note(&mut self, input: &NoteInput) -> Result<Note, DomainError> {
        self.requests.push(Request::Create(input.clone()));
        if let Some(e) = &self.create_failure {
            return Err(e.clone());
        }
        let note = Note {
            id: self.next_id,
            title: input.title.clone(),
            content: input.content.clone(),
        };
        self.next_id += 1;
        self.notes.insert(note.id, note.clone());
        Ok(note)
    }

    fn update_note(&mut self, id: i64, input: &NoteInput) -> Result<Note, DomainError> {
        self.requests.push(Request::Update(id, input.clone()));
        if let Some(e) = &self.update_failure {
            return Err(e.clone());
        }
        let note = self.notes.get_mut(&id).ok_or(DomainError::NoteNotFound(id))?;
        note.title = input.title.clone();
        note.content = input.content.clone();
        Ok(note.clone())
    }

    fn delete_note(&mut self, id: i64) -> Result<(), DomainError> {
        self.requests.push(Request::Delete(id));
        if let Some(e) = &self.delete_failure {
            return Err(e.clone());
        }
        self.notes
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NoteNotFound(id))
    }
}

/// Builder for MockNoteService
///
/// Provides a fluent interface for seeding the store and configuring failures.
pub struct MockNoteServiceBuilder {
    notes: BTreeMap<i64, Note>,
    list_failure: Option<DomainError>,
}

impl MockNoteServiceBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            list_failure: None,
        }
    }

    /// Seed a note the service already holds
    pub fn with_note(mut self, id: i64, title: &str, content: &str) -> Self {
        self.notes.insert(
            id,
            Note {
                id,
                title: title.to_string(),
                content: content.to_string(),
            },
        );
        self
    }

    /// Start with list calls failing
    pub fn with_list_failure(mut self, error: DomainError) -> Self {
        self.list_failure = Some(error);
        self
    }

    pub fn build(self) -> MockNoteService {
        let next_id = self.notes.keys().next_back().map_or(1, |id| id + 1);
        MockNoteService {
            notes: self.notes,
            next_id,
            requests: vec![],
            list_failure: self.list_failure,
            create_failure: None,
            update_failure: None,
            delete_failure: None,
        }
    }
}

impl Default for MockNoteServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "rustls", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Trace unless RUST_LOG says otherwise
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_seeded_notes_when_creating_then_assigns_next_id() {
        let mut mock = MockNoteService::builder()
            .with_note(1, "A", "x")
            .with_note(5, "B", "y")
            .build();

        let created = mock
            .create_note(&NoteInput::new("C", "z"))
            .expect("Create should succeed");

        assert_eq!(created.id, 6);
    }

    #[test]
    fn given_no_note_when_getting_note_then_returns_not_found() {
        let mut mock = MockNoteService::builder().build();

        let result = mock.get_note(999);

        assert!(matches!(result, Err(DomainError::NoteNotFound(999))));
        assert_eq!(mock.requests(), &[Request::Get(999)]);
    }

    #[test]
    fn given_list_failure_when_recovered_then_lists_again() {
        let mut mock = MockNoteService::builder()
            .with_note(1, "A", "x")
            .with_list_failure(DomainError::Unreachable("down".to_string()))
            .build();
        assert!(mock.list_notes().is_err());

        mock.recover();

        assert_eq!(mock.list_notes().expect("List should succeed").len(), 1);
    }

    #[test]
    fn given_existing_note_when_updating_then_store_changes() {
        let mut mock = MockNoteService::builder().with_note(1, "A", "x").build();

        mock.update_note(1, &NoteInput::new("A2", "x"))
            .expect("Update should succeed");

        assert_eq!(mock.get_note(1).expect("Note should exist").title, "A2");
    }

    #[test]
    fn given_unknown_id_when_deleting_then_returns_not_found() {
        let mut mock = MockNoteService::builder().build();

        let result = mock.delete_note(3);

        assert_eq!(result, Err(DomainError::NoteNotFound(3)));
    }
}
