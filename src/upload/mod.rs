//! Upload module
//!
//! The upload request lifecycle: size validation, multipart transfer,
//! response interpretation, and failure classification.

use bytes::Bytes;
use std::path::Path;
use thiserror::Error;

pub mod service;

/// Upload errors
///
/// Every way an upload can end short of success. The service converts all
/// transport-level failures into `Transport`; nothing else crosses its
/// boundary.
#[derive(Error, Debug)]
pub enum UploadError {
    /// File exceeds the configured limit. Detected locally; no request is made.
    #[error("File too large. Maximum upload size is {limit_mib} MB.")]
    TooLarge { size: u64, limit_mib: u64 },

    /// Endpoint reachable but did not accept the file. The raw status and
    /// payload are logged, never surfaced to the user.
    #[error("Failed to upload file.")]
    ServerRejected,

    /// Network-level failure; carries the underlying error text.
    #[error("{0}")]
    Transport(String),
}

/// Successful upload outcome
#[derive(Debug, Clone)]
pub struct Uploaded {
    /// Hosted URL, ready to insert into the compose box
    pub url: String,
}

/// Result of one upload attempt
pub type UploadResult = Result<Uploaded, UploadError>;

/// A file selected for upload.
///
/// Owns the filename and the bytes for the duration of one upload call. The
/// content is a [`Bytes`] handle, so cloning is cheap and two concurrent
/// uploads of the same handle never contend.
#[derive(Debug, Clone)]
pub struct FileHandle {
    name: String,
    content: Bytes,
}

impl FileHandle {
    /// Wrap in-memory content under a filename
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, using its final path component as the name
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        let content = tokio::fs::read(path).await?;
        Ok(Self::new(name, content))
    }

    /// Filename presented to the endpoint
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content length in bytes
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// File content
    pub fn content(&self) -> Bytes {
        self.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_handle() {
        let file = FileHandle::new("cat.png", vec![1u8, 2, 3]);
        assert_eq!(file.name(), "cat.png");
        assert_eq!(file.size(), 3);
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let file = FileHandle::from_path(&path).await.unwrap();
        assert_eq!(file.name(), "note.txt");
        assert_eq!(file.size(), 5);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = FileHandle::from_path("/nonexistent/ghost.bin").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display() {
        let err = UploadError::TooLarge {
            size: 600 * 1024 * 1024,
            limit_mib: 500,
        };
        assert_eq!(
            err.to_string(),
            "File too large. Maximum upload size is 500 MB."
        );
        assert_eq!(
            UploadError::ServerRejected.to_string(),
            "Failed to upload file."
        );
    }
}
