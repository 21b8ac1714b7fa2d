// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Note service base URL, overrides the config file
    #[arg(short, long, value_name = "URL", global = true, env = "NOTESYNC_BASE_URL")]
    pub base_url: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all notes
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note ID to show
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a note
    Add {
        #[arg(value_name = "TITLE")]
        title: String,

        #[arg(value_name = "CONTENT")]
        content: String,
    },

    /// Edit a note's title and/or content
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Open the current notes in the browser
    View,

    /// Interactive session
    Shell,

    /// Write a default config file (to --config or the default location)
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
