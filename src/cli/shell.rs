// src/cli/shell.rs
//
// Line-oriented interactive front end. Each input line is one user event;
// the controller state is re-rendered after every event.
use crate::application::{NoteService, NotesController};
use crate::domain::DomainError;
use crate::ports::TerminalPresenter;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

const HELP: &str = "\
commands:
  list                      reload and show notes
  title <text>              set the new-note title
  content <text>            set the new-note content
  add                       add the new note
  edit <id>                 open a note for editing
  set title <text>          change the title being edited
  set content <text>        change the content being edited
  save                      save the open edit
  cancel                    close the edit without saving
  delete <id>               delete a note (asks first)
  dismiss                   hide the current notice
  help                      show this help
  quit                      leave
";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    List,
    DraftTitle(String),
    DraftContent(String),
    Add,
    Edit(i64),
    SetTitle(String),
    SetContent(String),
    Save,
    Cancel,
    Delete(i64),
    Dismiss,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let parse_id = |s: &str| {
        s.trim()
            .parse::<i64>()
            .map_err(|_| format!("not a note id: {:?}", s.trim()))
    };

    match word {
        "list" | "ls" => Ok(ShellCommand::List),
        "title" => Ok(ShellCommand::DraftTitle(rest.to_string())),
        "content" => Ok(ShellCommand::DraftContent(rest.to_string())),
        "add" => Ok(ShellCommand::Add),
        "edit" => parse_id(rest).map(ShellCommand::Edit),
        "set" => match rest.split_once(' ').unwrap_or((rest, "")) {
            ("title", value) => Ok(ShellCommand::SetTitle(value.to_string())),
            ("content", value) => Ok(ShellCommand::SetContent(value.to_string())),
            _ => Err("usage: set title|content <text>".to_string()),
        },
        "save" => Ok(ShellCommand::Save),
        "cancel" => Ok(ShellCommand::Cancel),
        "delete" | "rm" => parse_id(rest).map(ShellCommand::Delete),
        "dismiss" => Ok(ShellCommand::Dismiss),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command: {other:?} (try 'help')")),
    }
}

pub struct Shell<S: NoteService> {
    controller: NotesController<S>,
    presenter: TerminalPresenter,
    confirm_delete: bool,
    notice_ttl: Duration,
}

impl<S: NoteService> Shell<S> {
    pub fn new(controller: NotesController<S>, confirm_delete: bool, notice_ttl: Duration) -> Self {
        Self {
            controller,
            presenter: TerminalPresenter::new(),
            confirm_delete,
            notice_ttl,
        }
    }

    pub fn controller(&self) -> &NotesController<S> {
        &self.controller
    }

    /// Mount, then process events until `quit` or end of input
    #[instrument(level = "debug", skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        // Mount-time load; a failure shows up as the notice
        if let Err(e) = self.controller.load() {
            debug!(error = %e, "Initial load failed");
        }
        self.render(&mut output)?;

        let mut line = String::new();
        loop {
            write!(output, "> ").context("Failed to write prompt")?;
            output.flush().context("Failed to flush output")?;

            line.clear();
            if input.read_line(&mut line).context("Failed to read input")? == 0 {
                debug!("End of input, leaving shell");
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            self.controller
                .state_mut()
                .expire_notice(Instant::now(), self.notice_ttl);

            match parse_command(&line) {
                Ok(ShellCommand::Quit) => return Ok(()),
                Ok(ShellCommand::Help) => {
                    write!(output, "{HELP}").context("Failed to write help")?;
                    continue;
                }
                Ok(command) => self.dispatch(command, &mut input, &mut output)?,
                Err(usage) => {
                    writeln!(output, "{usage}").context("Failed to write usage")?;
                    continue;
                }
            }
            self.render(&mut output)?;
        }
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: ShellCommand,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        debug!(?command, "Dispatching shell command");
        // Operation failures are already reflected in the notice
        let outcome: Result<(), DomainError> = match command {
            ShellCommand::List => self.controller.load(),
            ShellCommand::DraftTitle(text) => {
                self.controller.state_mut().set_draft_title(text);
                Ok(())
            }
            ShellCommand::DraftContent(text) => {
                self.controller.state_mut().set_draft_content(text);
                Ok(())
            }
            ShellCommand::Add => self.controller.create().map(|_| ()),
            ShellCommand::Edit(id) => {
                // Lookups in the local snapshot raise no notice of their own
                if self.controller.begin_edit_by_id(id).is_err() {
                    writeln!(output, "no note #{id} in the current list")
                        .context("Failed to write error")?;
                }
                Ok(())
            }
            // ignored while no edit is open
            ShellCommand::SetTitle(text) => {
                self.controller.state_mut().set_edit_title(text);
                Ok(())
            }
            ShellCommand::SetContent(text) => {
                self.controller.state_mut().set_edit_content(text);
                Ok(())
            }
            ShellCommand::Save => self.controller.save_edit(),
            ShellCommand::Cancel => {
                self.controller.cancel_edit();
                Ok(())
            }
            ShellCommand::Delete(id) => {
                self.controller.request_delete(id);
                if !self.confirm_delete || self.ask_confirmation(id, input, output)? {
                    self.controller.confirm_delete()
                } else {
                    self.controller.cancel_delete();
                    Ok(())
                }
            }
            ShellCommand::Dismiss => {
                self.controller.state_mut().dismiss_notice();
                Ok(())
            }
            ShellCommand::Help | ShellCommand::Quit => Ok(()),
        };

        if let Err(e) = outcome {
            debug!(error = %e, "Shell command failed");
        }
        Ok(())
    }

    fn ask_confirmation<R: BufRead, W: Write>(
        &self,
        id: i64,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool> {
        let prompt = self
            .presenter
            .render_delete_prompt(id, self.controller.state().find(id));
        write!(output, "{prompt}").context("Failed to write prompt")?;
        output.flush().context("Failed to flush output")?;

        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn render<W: Write>(&self, output: &mut W) -> Result<()> {
        write!(
            output,
            "{}",
            self.presenter.render_screen(self.controller.state())
        )
        .context("Failed to write screen")
    }
}
