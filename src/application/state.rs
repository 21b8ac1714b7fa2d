// src/application/state.rs
//
// UI state bundle and its transitions. Nothing in here performs I/O: every
// transition takes the current state, the user event and (for round trips)
// the service response, and produces the next state.
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::{DomainError, Note, NoteInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    FetchFailed,
    FieldsRequired,
    NoteAdded,
    NoteUpdated,
    NoteDeleted,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
}

impl NoticeKind {
    pub fn is_failure(self) -> bool {
        !matches!(
            self,
            NoticeKind::NoteAdded | NoticeKind::NoteUpdated | NoticeKind::NoteDeleted
        )
    }
}

/// Transient status message shown after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub visible: bool,
    raised_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, detail: Option<&DomainError>) -> Self {
        let message = match (kind, detail) {
            (NoticeKind::FetchFailed, _) => "Failed to fetch notes".to_string(),
            (NoticeKind::FieldsRequired, _) => "Title and content required".to_string(),
            (NoticeKind::NoteAdded, _) => "Note added".to_string(),
            (NoticeKind::NoteUpdated, _) => "Note updated".to_string(),
            (NoticeKind::NoteDeleted, _) => "Note deleted".to_string(),
            (NoticeKind::CreateFailed, Some(e)) => format!("Failed to add note: {e}"),
            (NoticeKind::UpdateFailed, Some(e)) => format!("Failed to update note: {e}"),
            (NoticeKind::DeleteFailed, Some(e)) => format!("Failed to delete note: {e}"),
            (NoticeKind::CreateFailed, None) => "Failed to add note".to_string(),
            (NoticeKind::UpdateFailed, None) => "Failed to update note".to_string(),
            (NoticeKind::DeleteFailed, None) => "Failed to delete note".to_string(),
        };
        Self {
            kind,
            message,
            visible: true,
            raised_at: Instant::now(),
        }
    }
}

/// Buffer backing the edit dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl EditBuffer {
    pub fn input(&self) -> NoteInput {
        NoteInput::new(self.title.clone(), self.content.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSurface {
    #[default]
    Closed,
    Open(EditBuffer),
}

impl EditSurface {
    pub fn is_open(&self) -> bool {
        matches!(self, EditSurface::Open(_))
    }
}

/// Identifies one List round trip. Generations only grow, so the newest
/// issued ticket is the only one whose response may replace the snapshot
/// once a later one has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct NotesState {
    notes: Vec<Note>,
    draft: NoteInput,
    editing: EditSurface,
    notice: Option<Notice>,
    pending_delete: Option<i64>,
    issued: u64,
    applied: u64,
}

impl NotesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successful snapshot
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn find(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// New-note input buffer
    pub fn draft(&self) -> &NoteInput {
        &self.draft
    }

    pub fn editing(&self) -> &EditSurface {
        &self.editing
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn raise(&mut self, kind: NoticeKind, detail: Option<&DomainError>) {
        let notice = Notice::new(kind, detail);
        debug!(?kind, message = %notice.message, "Raising notice");
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        if let Some(notice) = self.notice.as_mut() {
            notice.visible = false;
        }
    }

    /// Hide the notice once it has been visible for `ttl`
    pub fn expire_notice(&mut self, now: Instant, ttl: Duration) {
        if let Some(notice) = self.notice.as_mut() {
            if notice.visible && now.saturating_duration_since(notice.raised_at) >= ttl {
                notice.visible = false;
            }
        }
    }

    // ---- load ----

    pub fn issue_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Apply a List response. Returns false when the response was discarded
    /// because a newer load has already been applied.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        response: Result<Vec<Note>, DomainError>,
    ) -> bool {
        if ticket.0 <= self.applied {
            warn!(ticket = ticket.0, applied = self.applied, "Discarding stale load response");
            return false;
        }
        self.applied = ticket.0;
        match response {
            Ok(notes) => {
                debug!(count = notes.len(), "Replacing snapshot");
                self.notes = notes;
            }
            Err(e) => {
                warn!(error = %e, "Load failed, keeping previous snapshot");
                self.raise(NoticeKind::FetchFailed, Some(&e));
            }
        }
        true
    }

    // ---- create ----

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Validate the draft before any request is sent
    pub fn check_draft(&mut self) -> Result<NoteInput, DomainError> {
        if self.draft.is_complete() {
            Ok(self.draft.clone())
        } else {
            self.raise(NoticeKind::FieldsRequired, None);
            Err(DomainError::FieldsRequired)
        }
    }

    pub fn apply_created(&mut self, response: &Result<Note, DomainError>) {
        match response {
            Ok(_) => {
                self.draft = NoteInput::default();
                self.raise(NoticeKind::NoteAdded, None);
            }
            Err(e) => self.raise(NoticeKind::CreateFailed, Some(e)),
        }
    }

    // ---- edit ----

    pub fn begin_edit(&mut self, note: &Note) {
        self.editing = EditSurface::Open(EditBuffer {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
        });
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        if let EditSurface::Open(buffer) = &mut self.editing {
            buffer.title = title.into();
        }
    }

    pub fn set_edit_content(&mut self, content: impl Into<String>) {
        if let EditSurface::Open(buffer) = &mut self.editing {
            buffer.content = content.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = EditSurface::Closed;
    }

    /// Buffer to submit, or None when no edit is open
    pub fn edit_submission(&self) -> Option<(i64, NoteInput)> {
        match &self.editing {
            EditSurface::Open(buffer) => Some((buffer.id, buffer.input())),
            EditSurface::Closed => None,
        }
    }

    pub fn apply_updated(&mut self, response: &Result<Note, DomainError>) {
        match response {
            Ok(_) => {
                self.editing = EditSurface::Closed;
                self.raise(NoticeKind::NoteUpdated, None);
            }
            Err(e) => self.raise(NoticeKind::UpdateFailed, Some(e)),
        }
    }

    // ---- delete ----

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Leave PendingConfirmation, yielding the confirmed id
    pub fn confirm_delete(&mut self) -> Option<i64> {
        self.pending_delete.take()
    }

    pub fn apply_deleted(&mut self, response: &Result<(), DomainError>) {
        match response {
            Ok(()) => self.raise(NoticeKind::NoteDeleted, None),
            Err(e) => self.raise(NoticeKind::DeleteFailed, Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn given_two_loads_when_older_resolves_last_then_newer_snapshot_wins() {
        // Arrange
        let mut state = NotesState::new();
        let first = state.issue_load();
        let second = state.issue_load();

        // Act
        let applied_second = state.apply_load(second, Ok(vec![note(2, "B", "y")]));
        let applied_first = state.apply_load(first, Ok(vec![note(1, "A", "x")]));

        // Assert
        assert!(applied_second);
        assert!(!applied_first);
        assert_eq!(state.notes(), &[note(2, "B", "y")]);
    }

    #[test]
    fn given_loads_in_order_when_applied_then_each_replaces_snapshot() {
        let mut state = NotesState::new();
        let first = state.issue_load();
        let second = state.issue_load();

        assert!(state.apply_load(first, Ok(vec![note(1, "A", "x")])));
        assert!(state.apply_load(second, Ok(vec![])));
        assert!(state.notes().is_empty());
    }

    #[test]
    fn given_snapshot_when_load_fails_then_keeps_snapshot_and_raises_fetch_failed() {
        // Arrange
        let mut state = NotesState::new();
        let ticket = state.issue_load();
        state.apply_load(ticket, Ok(vec![note(1, "A", "x")]));

        // Act
        let ticket = state.issue_load();
        state.apply_load(ticket, Err(DomainError::Unreachable("refused".to_string())));

        // Assert
        assert_eq!(state.notes(), &[note(1, "A", "x")]);
        let notice = state.notice().expect("notice raised");
        assert_eq!(notice.kind, NoticeKind::FetchFailed);
        assert_eq!(notice.message, "Failed to fetch notes");
    }

    #[test]
    fn given_empty_content_when_checking_draft_then_raises_fields_required() {
        let mut state = NotesState::new();
        state.set_draft_title("B");

        let result = state.check_draft();

        assert_eq!(result, Err(DomainError::FieldsRequired));
        assert_eq!(
            state.notice().map(|n| n.message.as_str()),
            Some("Title and content required")
        );
    }

    #[test]
    fn given_failed_create_when_applied_then_keeps_draft() {
        let mut state = NotesState::new();
        state.set_draft_title("B");
        state.set_draft_content("y");

        state.apply_created(&Err(DomainError::Rejected {
            status: 500,
            message: "boom".to_string(),
        }));

        assert_eq!(state.draft(), &NoteInput::new("B", "y"));
        let notice = state.notice().expect("notice raised");
        assert_eq!(notice.kind, NoticeKind::CreateFailed);
        assert!(notice.message.contains("boom"));
    }

    #[test]
    fn given_closed_surface_when_setting_edit_title_then_stays_closed() {
        let mut state = NotesState::new();

        state.set_edit_title("ignored");

        assert_eq!(state.editing(), &EditSurface::Closed);
        assert!(state.edit_submission().is_none());
    }

    #[test]
    fn given_open_surface_when_editing_buffer_then_submission_reflects_changes() {
        let mut state = NotesState::new();
        state.begin_edit(&note(1, "A", "x"));

        state.set_edit_title("A2");

        assert_eq!(state.edit_submission(), Some((1, NoteInput::new("A2", "x"))));
    }

    #[test]
    fn given_failed_update_when_applied_then_surface_stays_open() {
        let mut state = NotesState::new();
        state.begin_edit(&note(1, "A", "x"));

        state.apply_updated(&Err(DomainError::NoteNotFound(1)));

        assert!(state.editing().is_open());
        assert_eq!(state.notice().map(|n| n.kind), Some(NoticeKind::UpdateFailed));
    }

    #[test]
    fn given_pending_delete_when_cancelled_then_nothing_to_confirm() {
        let mut state = NotesState::new();
        state.request_delete(3);

        state.cancel_delete();

        assert_eq!(state.confirm_delete(), None);
        assert!(state.notice().is_none());
    }

    #[test]
    fn given_visible_notice_when_ttl_elapsed_then_hidden() {
        let mut state = NotesState::new();
        state.raise(NoticeKind::NoteAdded, None);
        let raised = Instant::now();

        state.expire_notice(raised + Duration::from_millis(2500), Duration::from_millis(2000));

        assert!(!state.notice().expect("notice kept").visible);
    }

    #[test]
    fn given_fresh_notice_when_expiring_before_ttl_then_still_visible() {
        let mut state = NotesState::new();
        state.raise(NoticeKind::NoteDeleted, None);

        state.expire_notice(Instant::now(), Duration::from_secs(60));

        assert!(state.notice().expect("notice kept").visible);
    }

    #[test]
    fn given_notice_when_dismissed_then_hidden() {
        let mut state = NotesState::new();
        state.raise(NoticeKind::NoteUpdated, None);

        state.dismiss_notice();

        assert!(!state.notice().expect("notice kept").visible);
    }
}
