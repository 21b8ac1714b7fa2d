// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{NoteService, NotesController, NotesState};
use cli::args::{Args, Command};
use cli::shell::Shell;
use infrastructure::config::UiConfig;
use infrastructure::{Config, HttpNoteService, PageRenderer};
use ports::{HtmlPresenter, TerminalPresenter};
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesync with arguments");

    if let Command::Init { force } = args.command {
        let path = Config::init(args.config.as_deref(), force)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // Initialize infrastructure
    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        debug!(%base_url, "Overriding base URL from command line");
        config.service.base_url = base_url;
    }
    let service = HttpNoteService::new(&config.service.base_url, config.service.timeout())?;
    info!(base_url = %service.base_url(), "Using note service");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    execute(args.command, service, &config.ui, stdin.lock(), stdout.lock())
}

/// Run one command against `service`, reading confirmations from `input`
pub fn execute<S, R, W>(
    command: Command,
    service: S,
    ui: &UiConfig,
    mut input: R,
    mut output: W,
) -> Result<()>
where
    S: NoteService,
    R: BufRead,
    W: Write,
{
    let mut controller = NotesController::new(service);
    let presenter = TerminalPresenter::new();

    match command {
        Command::List { json } => {
            controller.load().context("Failed to fetch notes")?;
            if json {
                let json = serde_json::to_string_pretty(controller.state().notes())?;
                writeln!(output, "{json}")?;
            } else {
                write!(output, "{}", presenter.render_list(controller.state().notes()))?;
            }
        }
        Command::Show { note_id, json } => {
            let note = controller
                .fetch_note(note_id)
                .with_context(|| format!("Failed to fetch note {note_id}"))?;
            if json {
                writeln!(output, "{}", serde_json::to_string_pretty(&note)?)?;
            } else {
                write!(output, "{}", presenter.render_note(&note))?;
            }
        }
        Command::Add { title, content } => {
            let note = controller
                .create_with(title, content)
                .context("Failed to add note")?;
            info!(note_id = note.id, "Note added");
            report(&presenter, controller.state(), &mut output)?;
        }
        Command::Edit {
            note_id,
            title,
            content,
        } => {
            if title.is_none() && content.is_none() {
                bail!("Nothing to change: pass --title and/or --content");
            }
            controller.load().context("Failed to fetch notes")?;
            controller
                .begin_edit_by_id(note_id)
                .with_context(|| format!("Cannot edit note {note_id}"))?;
            if let Some(title) = title {
                controller.state_mut().set_edit_title(title);
            }
            if let Some(content) = content {
                controller.state_mut().set_edit_content(content);
            }
            controller.save_edit().context("Failed to update note")?;
            report(&presenter, controller.state(), &mut output)?;
        }
        Command::Delete { note_id, yes } => {
            controller.load().context("Failed to fetch notes")?;
            controller.request_delete(note_id);

            let confirmed = yes || !ui.confirm_delete || {
                let prompt =
                    presenter.render_delete_prompt(note_id, controller.state().find(note_id));
                write!(output, "{prompt}")?;
                output.flush()?;
                let mut answer = String::new();
                input
                    .read_line(&mut answer)
                    .context("Failed to read confirmation")?;
                matches!(answer.trim(), "y" | "Y" | "yes")
            };

            if confirmed {
                controller.confirm_delete().context("Failed to delete note")?;
                report(&presenter, controller.state(), &mut output)?;
            } else {
                controller.cancel_delete();
                writeln!(output, "Cancelled")?;
            }
        }
        Command::View => {
            // a failed load still renders, with the error banner
            if let Err(e) = controller.load() {
                debug!(error = %e, "Rendering page without fresh snapshot");
            }
            let html = HtmlPresenter::new().render(controller.state());
            let renderer = PageRenderer::new();
            let path = renderer.create_temp_file(&html)?;
            renderer.open_in_browser(&path)?;
        }
        Command::Shell => {
            let mut shell = Shell::new(controller, ui.confirm_delete, ui.notice_ttl());
            shell.run(input, output)?;
        }
        Command::Init { .. } => {
            bail!("init writes a config file and does not use the note service");
        }
    }

    Ok(())
}

// Notice line, then the refreshed snapshot
fn report<W: Write>(presenter: &TerminalPresenter, state: &NotesState, output: &mut W) -> Result<()> {
    if let Some(line) = state.notice().and_then(|n| presenter.render_notice(n)) {
        writeln!(output, "{line}")?;
    }
    write!(output, "{}", presenter.render_list(state.notes()))?;
    Ok(())
}
