//! Uploaded file metadata.

use serde::{Deserialize, Serialize};

/// Response of `POST /files/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub content_type: Option<String>,
}
