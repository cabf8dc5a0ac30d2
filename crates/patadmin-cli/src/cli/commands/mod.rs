//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod users;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use patadmin_core::users::FieldError;

/// Prints `prompt` to stderr and reads one line from stdin (without the line
/// ending). Returns an empty string at end of input.
fn read_line(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}").context("write prompt")?;
    stderr.flush().context("flush prompt")?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("read stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Uses the flag value, or asks for the password on stdin.
fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let password = read_line("Password: ")?;
    anyhow::ensure!(!password.is_empty(), "No password given");
    Ok(password)
}

fn report_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("  {error}");
    }
}
