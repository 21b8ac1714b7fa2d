use notesync::domain::{Note, NoteInput};
use anyhow::Result;

#[test]
fn given_service_list_body_when_deserializing_then_reads_all_notes() -> Result<()> {
    // Arrange
    let body = r#"[{"id":1,"title":"A","content":"x"},{"id":2,"title":"B","content":"y"}]"#;

    // Act
    let notes: Vec<Note> = serde_json::from_str(body)?;

    // Assert
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[1].id, 2);
    assert_eq!(notes[1].title, "B");
    Ok(())
}

#[test]
fn given_note_input_when_serializing_then_sends_only_title_and_content() -> Result<()> {
    // Arrange
    let input = NoteInput::new("Groceries", "milk");

    // Act
    let json: serde_json::Value = serde_json::to_value(&input)?;

    // Assert
    assert_eq!(json, serde_json::json!({"title": "Groceries", "content": "milk"}));
    Ok(())
}

#[test]
fn given_note_when_serializing_to_json_then_contains_all_fields() -> Result<()> {
    // Arrange
    let note = Note {
        id: 42,
        title: "Test title".to_string(),
        content: "Line one\nLine two".to_string(),
    };

    // Act
    let json = serde_json::to_string_pretty(&note)?;

    // Assert
    assert!(json.contains(r#""id": 42"#));
    assert!(json.contains(r#""title": "Test title""#));
    assert!(json.contains(r#""content": "Line one\nLine two""#));
    Ok(())
}

#[test]
fn given_body_missing_id_when_deserializing_then_fails() {
    let result = serde_json::from_str::<Note>(r#"{"title":"A","content":"x"}"#);

    assert!(result.is_err());
}
