//! Typed calls for the `/files` resource.
//!
//! Uploads are `multipart/form-data` with the content in a `file` part
//! and an optional `folder` text field.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use portal_client::http::encode_segment;
use portal_client::HttpClient;
use portal_core::{ApiError, ApiResult};
use portal_models::file::UploadedFile;

/// A file ready to be uploaded.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub folder: Option<String>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            content_type: None,
            folder: None,
        }
    }

    /// Read a file from disk, naming the upload after its last path
    /// component.
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ApiError::validation(format!("{} has no usable file name", path.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::validation(format!("cannot read {}: {e}", path.display())))?;
        Ok(Self::new(file_name, bytes))
    }

    pub fn content_type(mut self, mime: impl Into<String>) -> Self {
        self.content_type = Some(mime.into());
        self
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    fn into_form(self) -> ApiResult<Form> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(mime) = &self.content_type {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::validation(format!("invalid content type {mime}: {e}")))?;
        }
        let mut form = Form::new().part("file", part);
        if let Some(folder) = self.folder {
            form = form.text("folder", folder);
        }
        Ok(form)
    }
}

/// Calls mounted at `/files`.
///
/// ```text
/// POST   /files/upload         -> upload   (multipart)
/// DELETE /files/{filename}     -> delete
/// ```
#[derive(Debug, Clone)]
pub struct FilesApi {
    client: HttpClient,
}

impl FilesApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn upload(&self, file: FileUpload) -> ApiResult<UploadedFile> {
        let form = file.into_form()?;
        self.client.upload("/files/upload", form).await
    }

    pub async fn delete(&self, filename: &str) -> ApiResult<()> {
        self.client
            .delete_unit(&format!("/files/{}", encode_segment(filename)))
            .await
    }
}
