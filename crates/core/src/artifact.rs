//! Persistence of generated XML artifacts.
//!
//! Layout under the artifact root:
//! ```text
//! resource_{id}.xml              canonical document
//! {prefix}_resource_{id}.xml     one per MetadataFormat (datacite, iso, dif)
//! ```
//!
//! Writes go to a uniquely named temporary file in the same directory and
//! are renamed into place, so readers only ever observe complete files.

use std::path::{Path, PathBuf};

use crate::format::MetadataFormat;
use crate::hashing::sha256_hex;
use crate::types::DbId;

/// Failure while persisting an artifact.
#[derive(Debug, thiserror::Error)]
#[error("Failed to write file {path}: {source}")]
pub struct ArtifactWriteError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// Outcome of a successful artifact write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub path: PathBuf,
    /// SHA-256 hex digest of the written content.
    pub sha256: String,
    pub bytes: usize,
}

/// Resolves artifact paths and writes artifacts atomically.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the canonical document for a resource.
    pub fn canonical_path(&self, resource_id: DbId) -> PathBuf {
        self.root.join(format!("resource_{resource_id}.xml"))
    }

    /// Path of the transformed document for a resource and format.
    pub fn format_path(&self, format: MetadataFormat, resource_id: DbId) -> PathBuf {
        self.root.join(format!(
            "{}_resource_{resource_id}.xml",
            format.artifact_prefix()
        ))
    }

    /// Write `contents` to `path`, replacing any previous file.
    ///
    /// Creates the parent directory on demand.
    pub async fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<ArtifactRecord, ArtifactWriteError> {
        let io_err = |source: std::io::Error| ArtifactWriteError {
            path: path.display().to_string(),
            source,
        };

        let dir = path.parent().unwrap_or(&self.root);
        tokio::fs::create_dir_all(dir).await.map_err(io_err)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".to_string());
        let tmp_path = dir.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));

        let mut guard = TempFileGuard::new(tmp_path);
        tokio::fs::write(guard.path(), contents.as_bytes())
            .await
            .map_err(io_err)?;
        tokio::fs::rename(guard.path(), path).await.map_err(io_err)?;
        guard.disarm();

        Ok(ArtifactRecord {
            path: path.to_path_buf(),
            sha256: sha256_hex(contents.as_bytes()),
            bytes: contents.len(),
        })
    }
}

/// Removes a temporary file on drop unless disarmed, so a failed or
/// cancelled write leaves nothing behind.
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
