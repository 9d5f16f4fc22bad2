use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Compact logs on stderr, for the one-shot commands.
pub fn init_stderr() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Appends logs to `path`. The terminal UI uses this so log lines never land
/// on the alternate screen; without a log file it runs with logging off.
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
