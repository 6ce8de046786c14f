use color_eyre::eyre::Result;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, Level};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log filename used by the daemon.
pub const LOG_FILENAME: &str = "lostfound-daemon.log";

/// Global log file path, set once at startup.
static LOG_FILE_PATH: OnceLock<String> = OnceLock::new();

/// Store the log file path for later retrieval (e.g., in structured error responses).
///
/// Only the first call takes effect.
pub fn set_log_file_path(path: String) {
    if let Err(rejected) = LOG_FILE_PATH.set(path) {
        debug!("Log file path already set; ignoring {rejected}");
    }
}

/// Get the log file path set at startup.
#[must_use]
pub fn get_log_file_path() -> &'static str {
    LOG_FILE_PATH.get().map_or("", String::as_str)
}

/// `~/.lostfound/logs`
#[must_use]
pub fn default_log_dir() -> PathBuf {
    crate::config::lostfound_home().join("logs")
}

/// Configuration for the logging system.
pub struct LogConfig {
    /// Directory where log files will be written.
    pub log_dir: PathBuf,
    /// Default log level when `RUST_LOG` is not set.
    pub log_level: Level,
    /// Whether to use JSON format for logs.
    pub json_format: bool,
    /// Log rotation period.
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lostfound_daemon={level}")))
}

/// Initialize the logging system with the given configuration.
///
/// Output goes both to a rotating file and to stdout. `RUST_LOG` overrides
/// the configured level.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init_logging(config: LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = RollingFileAppender::new(config.rotation, &config.log_dir, LOG_FILENAME);

    if config.json_format {
        let json_file_layer = fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_filter(env_filter(config.log_level));

        let json_stdout_layer = fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_filter(env_filter(config.log_level));

        tracing_subscriber::registry()
            .with(json_file_layer)
            .with(json_stdout_layer)
            .with(ErrorLayer::default())
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_ansi(false)
            .with_filter(env_filter(config.log_level));

        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true)
            .with_filter(env_filter(config.log_level));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stdout_layer)
            .with(ErrorLayer::default())
            .init();
    }

    Ok(())
}

/// Parse rotation period from string. Unknown values fall back to daily.
#[must_use]
pub fn parse_rotation(s: &str) -> Rotation {
    match s.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.json_format);
        assert!(config.log_dir.ends_with(".lostfound/logs"));
    }

    #[test]
    fn test_parse_rotation_hourly() {
        let debug = format!("{:?}", parse_rotation("HOURLY"));
        let hourly = format!("{:?}", Rotation::HOURLY);
        assert_eq!(debug, hourly);
    }

    #[test]
    fn test_parse_rotation_never() {
        let debug = format!("{:?}", parse_rotation("Never"));
        assert_eq!(debug, format!("{:?}", Rotation::NEVER));
    }

    #[test]
    fn test_parse_rotation_unknown_defaults_to_daily() {
        let weekly = format!("{:?}", parse_rotation("weekly"));
        assert_eq!(weekly, format!("{:?}", Rotation::DAILY));
    }

    #[test]
    fn test_log_file_path_is_set_once() {
        set_log_file_path("/tmp/lostfound-first.log".to_string());
        set_log_file_path("/tmp/lostfound-second.log".to_string());
        assert_eq!(get_log_file_path(), "/tmp/lostfound-first.log");
    }

    #[test]
    fn test_log_filename_constant() {
        assert_eq!(LOG_FILENAME, "lostfound-daemon.log");
    }
}
