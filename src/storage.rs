//! Client-side rules for the object-storage collaborator: size ceilings
//! checked before any upload call, and the path layout uploads are keyed
//! under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;
pub const MAX_AUDIO_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadKind {
    Image,
    Audio,
}

impl UploadKind {
    /// Top-level path segment for this kind of upload.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Image => "images",
            UploadKind::Audio => "audio",
        }
    }

    pub fn max_bytes(&self) -> u64 {
        match self {
            UploadKind::Image => MAX_IMAGE_BYTES,
            UploadKind::Audio => MAX_AUDIO_BYTES,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("upload of {size} bytes exceeds the {limit}-byte limit")]
    FileTooLarge { size: u64, limit: u64 },
}

/// Reject oversized payloads locally, before the network call.
pub fn check_upload_size(kind: UploadKind, size: u64) -> Result<(), StorageError> {
    let limit = kind.max_bytes();
    if size > limit {
        return Err(StorageError::FileTooLarge { size, limit });
    }
    Ok(())
}

/// Storage path for an upload: `<kind>/<owner_id>/<millisecond timestamp>`
/// with the original extension appended when present.
pub fn object_path(
    kind: UploadKind,
    owner_id: &str,
    at: DateTime<Utc>,
    extension: Option<&str>,
) -> String {
    let base = format!("{}/{}/{}", kind.as_str(), owner_id, at.timestamp_millis());
    match extension {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}
