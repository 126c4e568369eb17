use anyhow::Result;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directory for log files
pub const LOG_DIR: &str = "logs";
/// Log file name prefix
pub const LOG_FILE: &str = "agent.log";

/// Initialize the logging system
/// Logs will be written to the logs/ directory only (no console output)
pub fn init_logging() -> Result<()> {
    init_logging_in(LOG_DIR)
}

/// Initialize logging into a specific directory
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_in(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(dir)?;

    // File appender - daily rotation
    let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Default to INFO level, can be overridden with RUST_LOG env var
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Logging system initialized");
    tracing::info!("Log files location: {}", dir.join(LOG_FILE).display());

    Ok(())
}

/// Check if logs directory exists
pub fn logs_dir_exists() -> bool {
    Path::new(LOG_DIR).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("logs");

        // Another test binary may already own the global subscriber
        let _ = init_logging_in(&dir);

        assert!(dir.exists());
    }
}
