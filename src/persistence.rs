//! JSON snapshot files backing the in-memory store and relay.
//!
//! Each snapshot is one pretty-printed JSON document holding every record of
//! a collection. Writes go to a uniquely named temp file in the same
//! directory and are renamed over the target, so a crash mid-write leaves the
//! previous snapshot intact.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

/// Current on-disk schema version.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Snapshot file for the item store.
pub const ITEMS_FILENAME: &str = "items.json";

/// Snapshot file for the message relay.
pub const MESSAGES_FILENAME: &str = "messages.json";

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Unsupported snapshot schema version {found} in {}",
        .path.display()
    )]
    UnsupportedVersion { path: PathBuf, found: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument<R> {
    schema_version: u32,
    updated_at: DateTime<Utc>,
    records: R,
}

/// Location of one collection's snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    #[must_use]
    pub fn new(data_dir: &Path, filename: &str) -> Self {
        Self {
            path: data_dir.join(filename),
        }
    }

    fn io_err(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read every record. A missing file is an empty collection.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>, SnapshotError> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_err(e))?
        {
            debug!("No snapshot at {}; starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.io_err(e))?;
        let doc: SnapshotDocument<Vec<T>> =
            serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
                path: self.path.clone(),
                source,
            })?;
        if doc.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                path: self.path.clone(),
                found: doc.schema_version,
            });
        }
        info!(
            path = %self.path.display(),
            records = doc.records.len(),
            "Loaded snapshot"
        );
        Ok(doc.records)
    }

    /// Replace the snapshot with `records`.
    pub async fn save<T: Serialize>(&self, records: &[T]) -> Result<(), SnapshotError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).await.map_err(|e| self.io_err(e))?;

        let doc = SnapshotDocument {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            updated_at: Utc::now(),
            records,
        };
        let content =
            serde_json::to_string_pretty(&doc).map_err(|source| SnapshotError::Json {
                path: self.path.clone(),
                source,
            })?;

        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "snapshot".into(), |n| n.to_string_lossy());
        let temp_path = dir.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&temp_path, &content)
            .await
            .map_err(|e| self.io_err(e))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| self.io_err(e))?;
        debug!(path = %self.path.display(), records = records.len(), "Wrote snapshot");
        Ok(())
    }
}
