//! Project directories on the local filesystem.
//!
//! Every accepted upload gets its own directory under the upload root, named
//! after a fresh project id. The directory holds the source file and the
//! result record, nothing else.

use crate::models::TranscriptionRecord;
use crate::{AppError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

pub const RECORD_FILE_NAME: &str = "transcription.json";
pub const DEFAULT_FILENAME: &str = "uploaded_video.mp4";

/// Name the source file is stored under, derived from the declared filename.
///
/// Keeps only the last path component (either separator style), falls back to
/// [`DEFAULT_FILENAME`] and never collides with the record file.
pub fn stored_file_name(declared: &str) -> String {
    let base = declared
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>();
    let base = base.trim();

    if base.is_empty() || base == "." || base == ".." {
        return DEFAULT_FILENAME.to_string();
    }
    if base == RECORD_FILE_NAME {
        return format!("source-{}", RECORD_FILE_NAME);
    }
    base.to_string()
}

/// A project directory that is removed again when dropped, unless
/// [`ProjectDir::persist`] was called.
///
/// Covers every way an ingest can end early: errors, the request future
/// being dropped on client disconnect, timeouts or shutdown.
#[derive(Debug)]
pub struct ProjectDir {
    pub id: String,
    pub path: PathBuf,
    keep: bool,
}

/// Create a fresh project directory under `root`.
///
/// The root is created if missing; the project directory itself must not
/// exist yet.
pub async fn create_project(root: &Path) -> Result<ProjectDir> {
    tokio::fs::create_dir_all(root).await.map_err(|e| {
        AppError::Storage(format!(
            "Failed to create upload root {}: {}",
            root.display(),
            e
        ))
    })?;

    let id = Uuid::new_v4().to_string();
    let path = root.join(&id);

    tokio::fs::create_dir(&path).await.map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => {
            AppError::Storage(format!("Project directory {} already exists", id))
        }
        _ => AppError::Storage(format!("Failed to create project directory: {}", e)),
    })?;

    tracing::debug!("Created project directory {:?}", path);

    Ok(ProjectDir {
        id,
        path,
        keep: false,
    })
}

impl ProjectDir {
    pub async fn open_source(&self, stored_name: &str) -> Result<SourceFile> {
        let path = self.path.join(stored_name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create source file: {}", e)))?;

        Ok(SourceFile {
            file,
            path,
            written: 0,
        })
    }

    pub async fn write_record(&self, record: &TranscriptionRecord) -> Result<PathBuf> {
        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| AppError::Internal(format!("Failed to serialize record: {}", e)))?;

        let path = self.path.join(RECORD_FILE_NAME);
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write record: {}", e)))?;

        Ok(path)
    }

    /// Keep the directory on disk. Call only once the record is written.
    pub fn persist(mut self) -> PathBuf {
        self.keep = true;
        self.path.clone()
    }
}

impl Drop for ProjectDir {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        // Sync removal: drop may run outside a runtime context.
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!("Removed incomplete project {}", self.id),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!("Failed to remove project directory {:?}: {}", self.path, e)
            }
        }
    }
}

/// Source file being streamed to disk.
#[derive(Debug)]
pub struct SourceFile {
    file: File,
    pub path: PathBuf,
    written: u64,
}

impl SourceFile {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write source file: {}", e)))?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and sync the file, returning the number of bytes written.
    pub async fn finish(mut self) -> Result<u64> {
        self.file
            .flush()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to flush source file: {}", e)))?;
        self.file
            .sync_all()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to sync source file: {}", e)))?;
        Ok(self.written)
    }
}
