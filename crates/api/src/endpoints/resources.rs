//! Typed calls for the `/resources` resource.

use portal_client::HttpClient;
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::resource::{CreateResource, Resource, ResourceQuery, UpdateResource};

/// Calls mounted at `/resources`.
///
/// ```text
/// GET    /resources/          -> list
/// POST   /resources/          -> create
/// GET    /resources/{id}      -> get
/// PUT    /resources/{id}      -> update
/// DELETE /resources/{id}      -> delete
/// ```
#[derive(Debug, Clone)]
pub struct ResourcesApi {
    client: HttpClient,
}

impl ResourcesApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ResourceQuery) -> ApiResult<Vec<Resource>> {
        self.client.get_query("/resources/", query).await
    }

    pub async fn get(&self, id: DbId) -> ApiResult<Resource> {
        self.client.get(&format!("/resources/{id}")).await
    }

    pub async fn create(&self, resource: &CreateResource) -> ApiResult<Resource> {
        self.client.post("/resources/", resource).await
    }

    pub async fn update(&self, id: DbId, update: &UpdateResource) -> ApiResult<Resource> {
        self.client.put(&format!("/resources/{id}"), update).await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client.delete_unit(&format!("/resources/{id}")).await
    }
}
