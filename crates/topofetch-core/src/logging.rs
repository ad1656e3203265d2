//! Logging init: file under the XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,topofetch=debug"))
}

/// Initialize structured logging to `~/.local/state/topofetch/topofetch.log`.
/// Returns Err when the state dir is unusable so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("topofetch")?;
    let log_path = xdg_dirs.place_state_file("topofetch.log")?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Per-event writer: clone the shared handle, degrade to stderr if that fails.
    let make_writer = move || -> Box<dyn Write> {
        match file.try_clone() {
            Ok(f) => Box::new(f),
            Err(_) => Box::new(io::stderr()),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(make_writer)
        .with_ansi(false)
        .init();

    tracing::info!("topofetch logging initialized at {}", log_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file). Use when `init_logging` fails
/// so the CLI still gets diagnostics.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
