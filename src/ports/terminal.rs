// src/ports/terminal.rs
use crate::application::{EditBuffer, EditSurface, Notice, NotesState};
use crate::constants::SUMMARY_WIDTH;
use crate::domain::Note;
use crate::util::text::summarize;
use std::fmt::Write;

/// Plain-text views of the controller state
#[derive(Debug)]
pub struct TerminalPresenter {
    summary_width: usize,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            summary_width: SUMMARY_WIDTH,
        }
    }

    /// One row per note: id, title, first line of content
    pub fn render_list(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return "No notes\n".to_string();
        }
        let id_width = notes
            .iter()
            .map(|n| n.id.to_string().len())
            .max()
            .unwrap_or(1);

        let mut out = String::new();
        for note in notes {
            let _ = writeln!(
                out,
                "{:>width$}  {}  {}",
                note.id,
                note.title,
                summarize(&note.content, self.summary_width),
                width = id_width
            );
        }
        out
    }

    pub fn render_note(&self, note: &Note) -> String {
        format!("#{} {}\n\n{}\n", note.id, note.title, note.content)
    }

    /// None once the notice has been hidden
    pub fn render_notice(&self, notice: &Notice) -> Option<String> {
        if !notice.visible {
            return None;
        }
        let tag = if notice.kind.is_failure() { "error" } else { "ok" };
        Some(format!("[{tag}] {}", notice.message))
    }

    pub fn render_edit(&self, buffer: &EditBuffer) -> String {
        format!(
            "Edit note {}\n  title:   {}\n  content: {}\n",
            buffer.id, buffer.title, buffer.content
        )
    }

    pub fn render_delete_prompt(&self, id: i64, note: Option<&Note>) -> String {
        match note {
            Some(note) => format!("Delete this note? #{id} {} [y/N] ", note.title),
            None => format!("Delete this note? #{id} [y/N] "),
        }
    }

    /// Full screen for the interactive shell
    pub fn render_screen(&self, state: &NotesState) -> String {
        let mut out = self.render_list(state.notes());

        let draft = state.draft();
        if !draft.title.is_empty() || !draft.content.is_empty() {
            let _ = writeln!(out, "\nNew note\n  title:   {}\n  content: {}", draft.title, draft.content);
        }
        if let EditSurface::Open(buffer) = state.editing() {
            out.push('\n');
            out.push_str(&self.render_edit(buffer));
        }
        if let Some(line) = state.notice().and_then(|n| self.render_notice(n)) {
            let _ = writeln!(out, "\n{line}");
        }
        out
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NoticeKind;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn given_no_notes_when_rendering_list_then_says_so() {
        let presenter = TerminalPresenter::new();

        assert_eq!(presenter.render_list(&[]), "No notes\n");
    }

    #[test]
    fn given_notes_when_rendering_list_then_aligns_ids() {
        let presenter = TerminalPresenter::new();
        let notes = vec![note(3, "A", "x"), note(12, "B", "first\nsecond")];

        let out = presenter.render_list(&notes);

        assert_eq!(out, " 3  A  x\n12  B  first…\n");
    }

    #[test]
    fn given_failure_notice_when_rendering_then_tagged_error() {
        let presenter = TerminalPresenter::new();
        let mut state = NotesState::new();
        state.raise(NoticeKind::FetchFailed, None);

        let line = presenter.render_notice(state.notice().unwrap());

        assert_eq!(line.as_deref(), Some("[error] Failed to fetch notes"));
    }

    #[test]
    fn given_hidden_notice_when_rendering_then_nothing() {
        let presenter = TerminalPresenter::new();
        let mut state = NotesState::new();
        state.raise(NoticeKind::NoteAdded, None);
        state.dismiss_notice();

        assert!(presenter.render_notice(state.notice().unwrap()).is_none());
    }

    #[test]
    fn given_open_edit_when_rendering_screen_then_shows_buffer_and_notice() {
        let presenter = TerminalPresenter::new();
        let mut state = NotesState::new();
        state.begin_edit(&note(1, "A", "x"));
        state.raise(NoticeKind::NoteUpdated, None);

        let screen = presenter.render_screen(&state);

        assert!(screen.contains("Edit note 1"));
        assert!(screen.contains("title:   A"));
        assert!(screen.contains("[ok] Note updated"));
    }

    #[test]
    fn given_known_note_when_rendering_delete_prompt_then_names_it() {
        let presenter = TerminalPresenter::new();

        let prompt = presenter.render_delete_prompt(1, Some(&note(1, "Groceries", "milk")));

        assert_eq!(prompt, "Delete this note? #1 Groceries [y/N] ");
    }
}
