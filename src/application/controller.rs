// src/application/controller.rs
use crate::application::state::NotesState;
use crate::application::NoteService;
use crate::domain::{DomainError, Note};
use tracing::{debug, info, instrument, warn};

/// Mediates user intents into note service calls.
///
/// Every successful write is followed by a full reload, so the snapshot in
/// [`NotesState`] never drifts from the service while calls succeed.
pub struct NotesController<S: NoteService> {
    service: S,
    state: NotesState,
}

impl<S: NoteService> NotesController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: NotesState::new(),
        }
    }

    pub fn state(&self) -> &NotesState {
        &self.state
    }

    /// Input-buffer and notice edits that need no round trip
    pub fn state_mut(&mut self) -> &mut NotesState {
        &mut self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Fetch the full collection and replace the snapshot on success
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self) -> Result<(), DomainError> {
        let ticket = self.state.issue_load();
        let response = self.service.list_notes();
        let outcome = response.as_ref().map(|_| ()).map_err(Clone::clone);
        self.state.apply_load(ticket, response);
        outcome
    }

    /// Submit the draft buffer
    #[instrument(level = "debug", skip(self))]
    pub fn create(&mut self) -> Result<Note, DomainError> {
        let input = self.state.check_draft()?;
        let response = self.service.create_note(&input);
        self.state.apply_created(&response);
        let note = response?;
        info!(note_id = note.id, "Created note");
        self.resync();
        Ok(note)
    }

    /// Fill the draft and submit it
    pub fn create_with(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, DomainError> {
        self.state.set_draft_title(title);
        self.state.set_draft_content(content);
        self.create()
    }

    pub fn begin_edit(&mut self, note: &Note) {
        debug!(note_id = note.id, "Opening edit surface");
        self.state.begin_edit(note);
    }

    /// Open the edit surface for a note from the current snapshot
    pub fn begin_edit_by_id(&mut self, id: i64) -> Result<(), DomainError> {
        let note = self
            .state
            .find(id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))?;
        self.begin_edit(&note);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        debug!("Closing edit surface without saving");
        self.state.cancel_edit();
    }

    /// Submit the edit buffer; a no-op while the edit surface is closed
    #[instrument(level = "debug", skip(self))]
    pub fn save_edit(&mut self) -> Result<(), DomainError> {
        let Some((id, input)) = self.state.edit_submission() else {
            debug!("Save requested with no open edit, ignoring");
            return Ok(());
        };
        let response = self.service.update_note(id, &input);
        self.state.apply_updated(&response);
        response?;
        info!(note_id = id, "Updated note");
        self.resync();
        Ok(())
    }

    /// First step of a delete: wait for confirmation
    pub fn request_delete(&mut self, id: i64) {
        debug!(note_id = id, "Delete awaiting confirmation");
        self.state.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        debug!(pending = ?self.state.pending_delete(), "Delete declined");
        self.state.cancel_delete();
    }

    /// Second step of a delete; a no-op when nothing is pending
    #[instrument(level = "debug", skip(self))]
    pub fn confirm_delete(&mut self) -> Result<(), DomainError> {
        let Some(id) = self.state.confirm_delete() else {
            debug!("Confirmation with no pending delete, ignoring");
            return Ok(());
        };
        let response = self.service.delete_note(id);
        self.state.apply_deleted(&response);
        response?;
        info!(note_id = id, "Deleted note");
        self.resync();
        Ok(())
    }

    /// Fetch one note directly from the service, bypassing the snapshot
    pub fn fetch_note(&mut self, id: i64) -> Result<Note, DomainError> {
        self.service.get_note(id)
    }

    // Reload after a successful write. A failure here leaves the fetch
    // notice in place of the success notice.
    fn resync(&mut self) {
        if let Err(e) = self.load() {
            warn!(error = %e, "Reload after write failed");
        }
    }
}
