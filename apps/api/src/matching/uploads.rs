//! Upload drop zone: writes each uploaded part to a unique path and applies the retention policy.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::UploadRetention;

/// A file part received from a multipart request, held in memory until persisted.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub data: Bytes,
}

impl UploadedFile {
    /// Lower-cased extension of the original name; empty when there is none.
    pub fn type_tag(&self) -> String {
        Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// An upload that has been written to the drop zone.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub type_tag: String,
}

/// The shared upload directory. Cheap to clone; holds no open handles.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    retention: UploadRetention,
}

impl UploadStore {
    /// Creates the upload directory if it does not exist yet. Idempotent.
    pub fn open(dir: impl Into<PathBuf>, retention: UploadRetention) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, retention })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn persist(&self, file: &UploadedFile) -> std::io::Result<StoredUpload> {
        let path = self.dir.join(stored_file_name(&file.original_name));
        tokio::fs::write(&path, &file.data).await?;
        debug!("Stored upload {} ({} bytes)", path.display(), file.size());
        Ok(StoredUpload {
            path,
            type_tag: file.type_tag(),
        })
    }

    /// Called once a request is finished with its uploads. Removal failures are only logged.
    pub async fn release(&self, uploads: &[StoredUpload]) {
        if self.retention == UploadRetention::Retain {
            return;
        }
        for upload in uploads {
            if let Err(e) = tokio::fs::remove_file(&upload.path).await {
                warn!("Failed to remove upload {}: {e}", upload.path.display());
            }
        }
    }
}

/// `<epoch-millis>_<uuid>_<name>`, keeping only the final component of the client's name.
fn stored_file_name(original_name: &str) -> String {
    let name = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload");
    format!(
        "{}_{}_{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        name
    )
}
