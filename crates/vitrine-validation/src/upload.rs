// File: src/upload.rs
// Purpose: Uploaded file capability and the static extension/MIME table

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Extensions accepted by the `extension` rule and the MIME type a client
/// must declare for each of them.
static MIME_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("jpg", "image/jpeg"),
        ("png", "image/png"),
        ("svg", "image/svg+xml"),
        ("gif", "image/gif"),
        ("pdf", "application/pdf"),
    ])
});

/// Expected MIME type for a lower-cased extension
pub fn expected_mime(extension: &str) -> Option<&'static str> {
    MIME_TYPES.get(extension).copied()
}

/// Upload outcome reported by the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Ok,
    /// File exceeds the server-wide size limit
    IniSize,
    /// File exceeds the size limit declared by the form
    FormSize,
    Partial,
    NoFile,
    NoTmpDir,
    CantWrite,
    /// An extension stopped the upload
    Extension,
}

impl UploadStatus {
    pub fn is_ok(self) -> bool {
        self == UploadStatus::Ok
    }
}

/// Read-only view over a file received with a submission.
///
/// The validator never owns or mutates the file; it only looks at the
/// status and at what the client declared about it.
pub trait UploadedFile: fmt::Debug + Send + Sync {
    fn status(&self) -> UploadStatus;

    /// MIME type declared by the client
    fn client_media_type(&self) -> Option<&str>;

    /// Original filename declared by the client
    fn client_filename(&self) -> Option<&str>;

    /// Lower-cased extension of the client filename, empty when there is none
    fn client_extension(&self) -> String {
        let name = self.client_filename().unwrap_or_default();
        let base = name.rsplit('/').next().unwrap_or(name);
        match base.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        }
    }
}

/// Plain uploaded file metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub status: UploadStatus,
    pub media_type: Option<String>,
    pub filename: Option<String>,
}

impl FileUpload {
    /// Successfully received file
    pub fn new(filename: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Ok,
            media_type: Some(media_type.into()),
            filename: Some(filename.into()),
        }
    }

    /// Upload that failed before any content was stored
    pub fn failed(status: UploadStatus) -> Self {
        Self {
            status,
            media_type: None,
            filename: None,
        }
    }
}

impl UploadedFile for FileUpload {
    fn status(&self) -> UploadStatus {
        self.status
    }

    fn client_media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    fn client_filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}
