use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::StoreError;

/// A file persisted by the store.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub filename: String,
    pub path: PathBuf,
}

/// Build the artifact filename from a timestamp and a unique id:
/// `audio_<YYYYMMDDHHMMSS>_<uuid>.webm`, second resolution, UTC.
pub fn artifact_filename(now: DateTime<Utc>, id: Uuid) -> String {
    format!("audio_{}_{}.webm", now.format("%Y%m%d%H%M%S"), id)
}

/// Flat-file store for uploaded voice messages.
///
/// Every call writes a new file under the storage directory. Names embed a
/// random UUID, so concurrent writers never target the same path and no
/// locking is needed. Nothing is ever deleted here; retention is an
/// external concern.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one uploaded payload under a freshly generated name.
    ///
    /// Creates the storage directory (including parents) on first use.
    pub async fn store(&self, data: &Bytes) -> Result<StoredArtifact, StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: self.dir.display().to_string(),
                source,
            })?;

        let filename = artifact_filename(Utc::now(), Uuid::new_v4());
        let path = self.dir.join(&filename);
        fs::write(&path, data)
            .await
            .map_err(|source| StoreError::Write {
                path: path.display().to_string(),
                source,
            })?;

        info!(path = %path.display(), size_bytes = data.len(), "Stored uploaded audio");
        Ok(StoredArtifact { filename, path })
    }
}
