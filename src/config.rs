//! Daemon configuration loaded from `~/.lostfound/config.toml`.
//!
//! The file is optional; if it does not exist every field falls back to its
//! `Default` value, which means an in-memory store and no admin tokens.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// `[admin]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// SHA-256 hex digests of accepted admin bearer tokens.
    #[serde(default)]
    pub token_sha256: Vec<String>,
}

/// `[store]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory for JSON snapshots. Unset keeps everything in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaemonConfig {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Directory for user-scoped daemon data (`~/.lostfound`).
#[must_use]
pub fn lostfound_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lostfound")
}

#[must_use]
pub fn default_config_path() -> PathBuf {
    lostfound_home().join("config.toml")
}

/// Load the configuration at `path`.
///
/// Returns `Ok(DaemonConfig::default())` if the file does not exist so
/// callers never need to handle the "absent file" case specially.
pub fn load_config(path: &Path) -> Result<DaemonConfig, ConfigError> {
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(DaemonConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: DaemonConfig = toml::from_str(&content)?;
    if config.admin.token_sha256.is_empty() {
        warn!(
            "No admin tokens configured in {}; moderation RPCs will refuse every caller",
            path.display()
        );
    }
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_toml_produces_defaults() {
        let cfg: DaemonConfig = toml::from_str("").expect("Should parse empty TOML");
        assert_eq!(cfg, DaemonConfig::default());
        assert!(cfg.store.data_dir.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
[admin]
token_sha256 = ["ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"]

[store]
data_dir = "/var/lib/lostfound"
"#;
        let cfg: DaemonConfig = toml::from_str(toml_str).expect("Should parse");
        assert_eq!(cfg.admin.token_sha256.len(), 1);
        assert_eq!(
            cfg.store.data_dir,
            Some(PathBuf::from("/var/lib/lostfound"))
        );
    }

    #[test]
    fn test_unknown_admin_field_is_rejected() {
        let result: Result<DaemonConfig, _> = toml::from_str("[admin]\nis_admin = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = DaemonConfig {
            admin: AdminConfig {
                token_sha256: vec!["abc".to_string()],
            },
            store: StoreConfig {
                data_dir: Some(PathBuf::from("/tmp/lf")),
            },
        };
        let serialized = toml::to_string(&cfg).expect("Should serialize");
        let deserialized: DaemonConfig = toml::from_str(&serialized).expect("Should deserialize");
        assert_eq!(cfg, deserialized);
    }

    #[test]
    fn test_load_config_absent_file() {
        let dir = tempdir().expect("tempdir");
        let cfg = load_config(&dir.path().join("config.toml")).expect("absent file is ok");
        assert_eq!(cfg, DaemonConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().expect("tempdir");
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[store]\ndata_dir = \"data\"\n").expect("write config");

        let cfg = load_config(&config_path).expect("parse config");
        assert_eq!(cfg.store.data_dir, Some(PathBuf::from("data")));
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let dir = tempdir().expect("tempdir");
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[store\n").expect("write config");
        assert!(matches!(
            load_config(&config_path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with(".lostfound/config.toml"));
    }
}
