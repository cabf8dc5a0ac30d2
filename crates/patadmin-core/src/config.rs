//! Configuration management for patadmin.
//!
//! Loads configuration from ${PATADMIN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "PATADMIN_API_URL";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for patadmin configuration and data files.
    //!
    //! PATADMIN_HOME resolution order:
    //! 1. PATADMIN_HOME environment variable (if set)
    //! 2. ~/.config/patadmin (default)

    use std::path::PathBuf;

    /// Returns the patadmin home directory.
    pub fn patadmin_home() -> PathBuf {
        if let Ok(home) = std::env::var("PATADMIN_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".patadmin"),
            |h| h.join(".config").join("patadmin"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        patadmin_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        patadmin_home().join("session.json")
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds (0 disables)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Config::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// User listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    pub page_size: u32,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            page_size: Config::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default tracing filter directive (PATADMIN_LOG wins when set)
    pub level: String,
    /// Optional log file, relative to PATADMIN_HOME unless absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub users: UsersConfig,
    pub log: LogConfig,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:3333";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default config to `path`.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Resolves the API base URL with precedence: flag > env > config.
    ///
    /// The returned URL always ends with `/` so relative endpoint paths
    /// such as `auth/login` join under it instead of replacing its last
    /// segment.
    pub fn resolve_base_url(&self, flag: Option<&str>) -> Result<Url> {
        let env_url = std::env::var(API_URL_ENV).ok();
        let raw = [flag, env_url.as_deref(), Some(self.api.base_url.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
            .unwrap_or(Self::DEFAULT_BASE_URL);

        let mut url = Url::parse(raw).with_context(|| format!("Invalid API base URL: {raw}"))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.api.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.api.timeout_secs))
        }
    }

    /// Rows per page, never zero.
    pub fn page_size(&self) -> u32 {
        self.users.page_size.max(1)
    }

    /// Returns the log file path, if file logging is configured.
    pub fn log_file(&self) -> Option<PathBuf> {
        let file = self.log.file.as_deref()?.trim();
        if file.is_empty() {
            return None;
        }
        let path = PathBuf::from(file);
        Some(if path.is_absolute() {
            path
        } else {
            paths::patadmin_home().join(path)
        })
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
