use crate::constants::{CONFIG_DIR_NAME, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, NOTICE_TTL_MS};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for notesync
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UiConfig {
    /// Ask before deleting
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
}

// Default value functions
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_confirm_delete() -> bool { true }
fn default_notice_ttl_ms() -> u64 { NOTICE_TTL_MS }

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            confirm_delete: default_confirm_delete(),
            notice_ttl_ms: default_notice_ttl_ms(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl UiConfig {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load from `path` when given, else from the default location.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                debug!(?path, "Loading config from explicit path");
                Self::load(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => {
                    debug!(?path, "Loading config from default location");
                    Self::load(&path)
                }
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// `<config dir>/notesync/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write a default config to `path`, or to [`Config::default_path`].
    ///
    /// An existing file is only replaced when `force` is set.
    pub fn init(path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().context("Cannot determine config directory")?,
        };
        if path.exists() && !force {
            bail!(
                "Config file already exists at {} (pass --force to overwrite)",
                path.display()
            );
        }
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        Self::create_default(&path)?;
        debug!(path = %path.display(), "Wrote default config");
        Ok(path)
    }
}
