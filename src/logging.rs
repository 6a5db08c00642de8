//! Logging setup.
//!
//! The terminal belongs to the UI, so logs go to a file. `RUST_LOG` takes
//! precedence over the level chosen on the command line.

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for `level`, scoped to this crate.
pub fn filter_directive(level: &str) -> String {
    format!("warn,countdown_timer={}", level)
}

/// Installs a global subscriber appending to `path`.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init();

    tracing::info!(log_file = ?path, level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("debug"), "warn,countdown_timer=debug");
    }

    #[test]
    fn test_init_reports_unwritable_path() {
        let dir = std::env::temp_dir().join("countdown-timer-missing-dir-for-test");
        let _ = std::fs::remove_dir_all(&dir);
        let err = init(&dir.join("nested").join("log.txt"), "info").unwrap_err();
        assert!(matches!(err, Error::LogFile { .. }));
    }

    #[test]
    fn test_init_creates_file() {
        let path = std::env::temp_dir().join(format!(
            "countdown-timer-logging-test-{}.log",
            std::process::id()
        ));
        init(&path, "info").unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
