// src/infrastructure/renderer.rs
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::{debug, instrument};

/// Writes rendered pages to disk and hands them to the system browser
#[derive(Debug, Default)]
pub struct PageRenderer;

impl PageRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to a fresh `notes.html`.
    ///
    /// The directory is left on disk: the browser opens the page after this
    /// process has exited, so nothing here may clean it up.
    pub fn create_temp_file(&self, content: &str) -> Result<PathBuf> {
        let temp_dir = Builder::new()
            .prefix("notesync-")
            .rand_bytes(5)
            .tempdir()
            .context("Failed to create temporary directory")?;

        let file_path = temp_dir.path().join("notes.html");

        File::create(&file_path)
            .with_context(|| format!("Failed to create temp file at {}", file_path.display()))?
            .write_all(content.as_bytes())
            .context("Failed to write content to temporary file")?;

        let dir = temp_dir.keep();
        debug!(path = %file_path.display(), dir = %dir.display(), "Wrote snapshot page");

        Ok(file_path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn open_in_browser(&self, path: &Path) -> Result<()> {
        let path_str = path.to_str().context("Failed to convert path to string")?;

        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", path_str])
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }

        Ok(())
    }
}
