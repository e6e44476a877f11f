//! Logging initialization for the TUI binary.
//!
//! stdout belongs to the terminal UI, so log output goes to a file when one
//! is configured (flag or `PAPERDECK_LOG_FILE`) and is discarded otherwise.
//! `RUST_LOG` controls the filter, defaulting to `info`.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_ENV: &str = "PAPERDECK_LOG_FILE";

/// Installs the global subscriber. `log_file` wins over the environment
/// variable; with neither set, logging is a no-op.
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let from_env = std::env::var(LOG_FILE_ENV).ok();
    let Some(path) = log_file
        .map(|p| p.to_path_buf())
        .or_else(|| from_env.map(Into::into))
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_the_configured_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paperdeck.log");
        init_tracing(Some(&path)).unwrap();
        tracing::info!("smoke");
        assert!(path.exists());
    }
}

