//! Tracing subscriber setup.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "PATADMIN_LOG";

/// Installs the global subscriber.
///
/// Logs go to stderr unless `log.file` is configured. The returned guard
/// flushes the file writer and must live until the process exits.
///
/// # Errors
/// Fails on an invalid filter directive, an unusable log file location, or
/// when a global subscriber is already installed.
pub fn init_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    let directive = pick_directive(std::env::var(LOG_ENV).ok(), &config.log.level);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;

    let Some(path) = config.log_file() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install tracing subscriber")?;
        return Ok(None);
    };

    let dir = path
        .parent()
        .with_context(|| format!("Log file has no parent directory: {}", path.display()))?;
    let name = path
        .file_name()
        .with_context(|| format!("Log file has no file name: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(Some(guard))
}

/// `PATADMIN_LOG` wins when set and non-empty.
fn pick_directive(env: Option<String>, configured: &str) -> String {
    env.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured.trim().to_string())
}
