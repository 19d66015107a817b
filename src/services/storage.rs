//! On-disk storage for uploaded application documents.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// URL prefix under which stored files are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "doc", "docx"];

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub stored_name: String,
    pub public_path: String,
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write an uploaded file under a generated name, keeping its extension
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        let extension = allowed_extension(original_name).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported file type, allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

        self.ensure_root().await?;

        let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        tokio::fs::write(self.root.join(&stored_name), bytes).await?;

        tracing::debug!("Stored upload '{}' as {}", original_name, stored_name);

        Ok(StoredFile {
            public_path: format!("{}/{}", UPLOADS_URL_PREFIX, stored_name),
            stored_name,
        })
    }

    /// Delete a stored file given the public path recorded for it.
    ///
    /// Only the final path component is used, so a crafted path cannot
    /// escape the upload directory.
    pub async fn remove(&self, public_path: &str) -> Result<()> {
        let name = Path::new(public_path)
            .file_name()
            .ok_or_else(|| AppError::BadRequest("Invalid stored file path".to_string()))?;

        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove several files, logging rather than returning failures
    pub async fn remove_all(&self, public_paths: &[String]) {
        for path in public_paths {
            if let Err(e) = self.remove(path).await {
                tracing::warn!("Failed to remove stored document {}: {}", path, e);
            }
        }
    }
}

fn allowed_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
