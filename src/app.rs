use clap::Parser;
use std::path::PathBuf;

use crate::config::{default_config_path, load_config, ConfigError, DaemonConfig};

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("lostfound_descriptor");
pub const DEFAULT_ADDR: &str = "127.0.0.1:50061";

/// Lost & Found daemon - item board, moderation queue and message relay over gRPC
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "LOSTFOUND_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Comma-separated list of allowed CORS origins.
    /// Use "*" to allow all origins (not recommended for production).
    /// Example: --cors-origins=https://lostfound.campus.edu,http://localhost:5173
    #[arg(
        long,
        env = "LOSTFOUND_CORS_ORIGINS",
        default_value = crate::cors::DEFAULT_CORS_ORIGINS,
        value_delimiter = ','
    )]
    pub cors_origins: Vec<String>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "LOSTFOUND_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "LOSTFOUND_LOG_ROTATION", default_value = "daily")]
    pub log_rotation: String,

    /// Custom log directory (default: ~/.lostfound/logs)
    #[arg(long, env = "LOSTFOUND_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Directory for JSON snapshots of items and messages.
    /// Without it (here or in the config file) data lives in memory only.
    #[arg(long, env = "LOSTFOUND_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: ~/.lostfound/config.toml)
    #[arg(long, env = "LOSTFOUND_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Load the config file. A missing file yields defaults; a file that
    /// exists but does not parse is an error, never silently ignored.
    pub fn load_config(&self) -> Result<DaemonConfig, ConfigError> {
        load_config(&self.config_path())
    }

    /// Snapshot directory: the flag wins over the config file.
    #[must_use]
    pub fn data_dir(&self, config: &DaemonConfig) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| config.store.data_dir.clone())
    }

    /// Trimmed, non-empty CORS origins.
    #[must_use]
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

pub fn report_server_error(
    addr: std::net::SocketAddr,
    log_file: &std::path::Path,
    e: &tonic::transport::Error,
) {
    let err_string = format!("{e:?}");
    if err_string.contains("AddrInUse") {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of lostfound-daemon may already be running.");
        eprintln!("Use a different port with: lostfound-daemon --addr 127.0.0.1:50062");
        eprintln!();
    } else {
        eprintln!();
        eprintln!("Error: Failed to start server: {e}");
        eprintln!();
    }
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}
