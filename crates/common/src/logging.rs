//! Logging and tracing initialization.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// When `config.file` is set the log stream goes to that file (append mode)
/// instead of stderr; an unopenable file falls back to stderr. Repeated
/// initialization keeps the first subscriber.
pub fn init_logging(config: &LoggingConfig) {
    tracing::subscriber::set_global_default(build_subscriber(config)).ok();
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

fn build_subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file = config.file.as_deref().and_then(open_log_file);

    match (config.json, file) {
        (true, Some(file)) => Box::new(
            fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .with_writer(Mutex::new(file))
                .finish(),
        ),
        (true, None) => Box::new(
            fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .finish(),
        ),
        (false, Some(file)) => Box::new(
            fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish(),
        ),
        (false, None) => Box::new(
            fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        ),
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok()?;
        }
    }
    match File::options().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            // The subscriber is not installed yet, so stderr is the only
            // channel left for this.
            eprintln!("floatview: failed to open log file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_target_receives_log_events() {
        let path =
            std::env::temp_dir().join(format!("floatview-logging-{}.log", std::process::id()));
        let config = LoggingConfig {
            level: "debug".to_string(),
            json: false,
            file: Some(path.clone()),
        };

        tracing::subscriber::with_default(build_subscriber(&config), || {
            tracing::info!("file sink attached");
        });

        let contents = std::fs::read_to_string(&path).unwrap_or_default();
        let _ = std::fs::remove_file(&path);
        assert!(contents.contains("file sink attached"));
    }

    #[test]
    fn json_file_target_produces_structured_lines() {
        let path =
            std::env::temp_dir().join(format!("floatview-logging-json-{}.log", std::process::id()));
        let config = LoggingConfig {
            level: "debug".to_string(),
            json: true,
            file: Some(path.clone()),
        };

        tracing::subscriber::with_default(build_subscriber(&config), || {
            tracing::info!(node_id = 7, "structured sink attached");
        });

        let contents = std::fs::read_to_string(&path).unwrap_or_default();
        let _ = std::fs::remove_file(&path);
        let line = contents.lines().next().unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(line).expect("JSON log line");
        assert_eq!(value["fields"]["message"], "structured sink attached");
    }

    #[test]
    fn unopenable_file_falls_back_without_panicking() {
        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(std::path::PathBuf::from("/proc/floatview-denied/out.log")),
        };

        // Falls back to the stderr writer; must not panic or error out.
        tracing::subscriber::with_default(build_subscriber(&config), || {
            tracing::info!("fallback sink");
        });
    }
}
