//! Logging Infrastructure
//!
//! Structured logging setup for the terminal process embedding the core.

use std::path::Path;

/// Initialize the logger at `info`
pub fn init_logger() -> bool {
    init_logger_with_file(None, None)
}

/// Initialize the logger with optional daily-rolling file output
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) -> bool {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "pos-core");
            return subscriber.with_writer(file_appender).try_init().is_ok();
        }
    }

    subscriber.try_init().is_ok()
}

/// Initialize from [`crate::core::Config`]
pub fn init_from_config(config: &crate::core::Config) -> bool {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();
        let _first = init_logger_with_file(Some("debug"), Some(&dir_str));
        // Only one global subscriber can exist per process
        assert!(!init_logger());
    }
}
