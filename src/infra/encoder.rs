//! Turns local files into inline attachment payloads.

use crate::domain::AttachmentKind;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while encoding an attachment.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode {path}: {source}")]
    EncodingFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file ready to be attached to a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    /// Original file name, without directories.
    pub name: String,
    pub mime: String,
    /// `data:` URL carrying the whole file.
    pub data: String,
}

impl EncodedFile {
    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_mime(&self.mime)
    }
}

/// Produces inline attachment payloads from file paths.
///
/// This trait allows tests to attach files without touching the disk.
pub trait AttachmentEncoder {
    fn encode(&self, path: &Path) -> Result<EncodedFile, EncodeError>;
}

/// Reads files from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEncoder;

impl AttachmentEncoder for FileEncoder {
    fn encode(&self, path: &Path) -> Result<EncodedFile, EncodeError> {
        let bytes = std::fs::read(path).map_err(|source| EncodeError::EncodingFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_for(path);

        Ok(EncodedFile {
            name,
            mime: mime.to_string(),
            data: data_url(mime, &bytes),
        })
    }
}

/// Guesses a MIME type from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ipynb" => "application/x-ipynb+json",
        _ => "application/octet-stream",
    }
}

/// Encodes bytes as a base64 `data:` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
