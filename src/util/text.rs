// src/util/text.rs

/// First non-empty line of `text`, trimmed and cut to `width` characters.
///
/// A trailing ellipsis marks a cut, either of the line itself or of further
/// lines below it.
///
/// # Examples
///
/// ```
/// use notesync::util::text::summarize;
///
/// assert_eq!(summarize("milk\neggs", 20), "milk…");
/// assert_eq!(summarize("  bread  ", 20), "bread");
/// ```
pub fn summarize(text: &str, width: usize) -> String {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let Some(first) = lines.next() else {
        return String::new();
    };
    let more_lines = lines.next().is_some();

    let char_count = first.chars().count();
    if char_count > width {
        let cut: String = first.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut.trim_end())
    } else if more_lines {
        format!("{first}…")
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_single_short_line_when_summarizing_then_returns_line() {
        assert_eq!(summarize("milk and eggs", 40), "milk and eggs");
    }

    #[test]
    fn given_multiline_text_when_summarizing_then_marks_continuation() {
        assert_eq!(summarize("First line\nSecond line", 40), "First line…");
    }

    #[test]
    fn given_leading_blank_lines_when_summarizing_then_skips_them() {
        assert_eq!(summarize("\n\n   \nActual", 40), "Actual");
    }

    #[test]
    fn given_long_line_when_summarizing_then_cuts_to_width() {
        let summary = summarize("abcdefghij", 5);

        assert_eq!(summary, "abcd…");
        assert_eq!(summary.chars().count(), 5);
    }

    #[test]
    fn given_multibyte_text_when_summarizing_then_cuts_on_char_boundary() {
        assert_eq!(summarize("äöüäöü", 4), "äöü…");
    }

    #[test]
    fn given_empty_text_when_summarizing_then_returns_empty_string() {
        assert_eq!(summarize("", 10), "");
        assert_eq!(summarize(" \n ", 10), "");
    }
}
