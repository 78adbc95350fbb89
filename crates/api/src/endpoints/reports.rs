//! Typed calls for the `/reports` resource.
//!
//! Exports return raw bytes (CSV or JSON as produced by the backend)
//! rather than decoded records, but share the client's auth and error
//! handling with every other call.

use portal_client::{Download, HttpClient, Request};
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::report::{ExportKind, ExportQuery, Report, ReportRequest};

/// Calls mounted at `/reports`.
///
/// ```text
/// GET    /reports/                  -> list
/// POST   /reports/generate          -> generate
/// GET    /reports/{id}              -> get
/// DELETE /reports/{id}              -> delete
/// GET    /reports/export/{kind}     -> export   (?format=csv|json)
/// ```
#[derive(Debug, Clone)]
pub struct ReportsApi {
    client: HttpClient,
}

impl ReportsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Report>> {
        self.client.get("/reports/").await
    }

    pub async fn generate(&self, request: &ReportRequest) -> ApiResult<Report> {
        self.client.post("/reports/generate", request).await
    }

    pub async fn get(&self, id: DbId) -> ApiResult<Report> {
        self.client.get(&format!("/reports/{id}")).await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client.delete_unit(&format!("/reports/{id}")).await
    }

    /// Download a dataset export.
    ///
    /// When the backend sends no file name, one is derived from the kind and
    /// format (`volunteers.csv`).
    pub async fn export(&self, kind: ExportKind, query: &ExportQuery) -> ApiResult<Download> {
        let request = Request::get(format!("/reports/export/{kind}"))
            .query(query)
            .accept("*/*");
        let mut download = self.client.download(request).await?;
        if download.filename.is_none() {
            download.filename = Some(format!("{kind}.{}", query.format.extension()));
        }
        Ok(download)
    }
}
