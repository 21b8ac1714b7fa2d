// src/ports/html.rs
use crate::application::NotesState;
use crate::domain::Note;
use html_escape::encode_text;
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    // Content keeps its line breaks; everything else is escaped text
    fn render_note(&self, note: &Note) -> String {
        let content = encode_text(&note.content).replace('\n', "<br>");
        format!(
            r#"        <li class="note">
            <div class="note-title">{title}</div>
            <div class="note-content">{content}</div>
            <div class="note-id">#{id}</div>
        </li>
"#,
            title = encode_text(&note.title),
            content = content,
            id = note.id,
        )
    }

    #[instrument(level = "debug", skip_all, fields(notes = state.notes().len()))]
    pub fn render(&self, state: &NotesState) -> String {
        let items: String = state.notes().iter().map(|n| self.render_note(n)).collect();
        let list = if items.is_empty() {
            r#"        <li class="empty">No notes</li>
"#
            .to_string()
        } else {
            items
        };

        let notice = state
            .notice()
            .filter(|n| n.visible)
            .map(|n| {
                let class = if n.kind.is_failure() { "notice error" } else { "notice" };
                format!(
                    r#"    <div class="{class}">{}</div>
"#,
                    encode_text(&n.message)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Notes</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 600px;
            margin: 2.5rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        ul {{
            list-style: none;
            padding: 0;
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .note, .empty {{
            padding: 0.75rem 1rem;
            border-bottom: 1px solid #eee;
        }}
        .note-title {{
            font-weight: 600;
        }}
        .note-content {{
            color: #666;
        }}
        .note-id {{
            font-size: 0.8em;
            color: #999;
        }}
        .notice {{
            position: fixed;
            bottom: 1.5rem;
            left: 1.5rem;
            background: #323232;
            color: white;
            padding: 0.75rem 1rem;
            border-radius: 4px;
        }}
        .notice.error {{
            background: #b00020;
        }}
    </style>
</head>
<body>
    <h1>Notes</h1>
    <ul>
{list}    </ul>
{notice}</body>
</html>"#,
            list = list,
            notice = notice,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NoticeKind;
    use crate::domain::DomainError;
    use rstest::rstest;

    fn state_with(notes: Vec<Note>) -> NotesState {
        let mut state = NotesState::new();
        let ticket = state.issue_load();
        state.apply_load(ticket, Ok(notes));
        state
    }

    #[rstest]
    #[case("<script>alert(1)</script>", "&lt;script&gt;alert(1)&lt;/script&gt;")]
    #[case("Tom & Jerry", "Tom &amp; Jerry")]
    fn test_title_is_escaped(#[case] title: &str, #[case] expected: &str) {
        let presenter = HtmlPresenter::new();
        let state = state_with(vec![Note {
            id: 1,
            title: title.to_string(),
            content: "x".to_string(),
        }]);

        let html = presenter.render(&state);

        assert!(html.contains(expected));
    }

    #[test]
    fn given_multiline_content_when_rendering_then_keeps_line_breaks() {
        let presenter = HtmlPresenter::new();
        let state = state_with(vec![Note {
            id: 1,
            title: "A".to_string(),
            content: "one\ntwo".to_string(),
        }]);

        let html = presenter.render(&state);

        assert!(html.contains("one<br>two"));
    }

    #[test]
    fn given_empty_snapshot_when_rendering_then_shows_placeholder() {
        let html = HtmlPresenter::new().render(&NotesState::new());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No notes"));
        assert!(!html.contains(r#"class="notice"#));
    }

    #[test]
    fn given_fetch_failure_when_rendering_then_error_banner_shown() {
        let mut state = NotesState::new();
        let ticket = state.issue_load();
        state.apply_load(ticket, Err(DomainError::Unreachable("down".to_string())));

        let html = HtmlPresenter::new().render(&state);

        assert!(html.contains(r#"<div class="notice error">Failed to fetch notes</div>"#));
    }

    #[test]
    fn given_dismissed_notice_when_rendering_then_no_banner() {
        let mut state = NotesState::new();
        state.raise(NoticeKind::NoteDeleted, None);
        state.dismiss_notice();

        let html = HtmlPresenter::new().render(&state);

        assert!(!html.contains("Note deleted"));
    }
}
