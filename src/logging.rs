use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Daily-rotated log file in `log_dir`, created if missing.
pub fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("inline-diary.log")
        .build(log_dir)
}

/// Routes `tracing` output to a daily log file; the terminal is taken by the UI.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(log_dir: &Path, default_filter: &str) -> Result<WorkerGuard, InitError> {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn log_dir_under_a_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        assert!(file_appender(&file.join("logs")).is_err());
        assert!(init(&file.join("logs"), "info").is_err());
    }

    #[test]
    fn missing_log_dir_is_created() {
        let dir = TempDir::new().unwrap();
        let logs = dir.path().join("nested").join("logs");

        assert!(file_appender(&logs).is_ok());
        assert!(logs.is_dir());
    }
}
