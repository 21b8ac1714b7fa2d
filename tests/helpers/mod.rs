use anyhow::Result;
use notesync::cli::args::Command;
use notesync::infrastructure::config::UiConfig;
use notesync::util::testing::MockNoteService;
use std::io::Cursor;

/// Output of one command run against a mock service
pub struct CommandRun {
    pub result: Result<()>,
    pub output: String,
}

/// Execute `command` against `service`, feeding `input` to any prompt
pub fn run_command(
    command: Command,
    service: &mut MockNoteService,
    ui: &UiConfig,
    input: &str,
) -> CommandRun {
    let mut output = Vec::new();
    let result = notesync::execute(
        command,
        service,
        ui,
        Cursor::new(input.to_string()),
        &mut output,
    );
    CommandRun {
        result,
        output: String::from_utf8(output).expect("Output is UTF-8"),
    }
}

/// The single-note collection most scenarios start from
pub fn seeded_service() -> MockNoteService {
    MockNoteService::builder().with_note(1, "A", "x").build()
}
