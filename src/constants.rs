// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Note service used when neither the config file nor `--base-url` names one.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_BASE_URL: &str = "https://notes-app-iwa9.onrender.com";

/// Per-request timeout in seconds for calls to the note service.
///
/// Hosted instances of the service may cold-start, so the first request can
/// take a while. Requests that exceed this are reported as unreachable.
///
/// Used in: `infrastructure/config.rs`, `infrastructure/http.rs`
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long a notice stays visible before the shell hides it.
///
/// Used in: `infrastructure/config.rs`, `cli/shell.rs`
pub const NOTICE_TTL_MS: u64 = 2000;

/// Maximum characters of note content shown per row in list output.
///
/// Used in: `ports/terminal.rs`
pub const SUMMARY_WIDTH: usize = 60;

/// Directory name under the platform config dir holding `config.toml`.
///
/// Used in: `infrastructure/config.rs`
pub const CONFIG_DIR_NAME: &str = "notesync";
