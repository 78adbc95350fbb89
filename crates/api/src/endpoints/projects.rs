//! Typed calls for the `/projects` resource.

use portal_client::HttpClient;
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::project::{CreateProject, Project, ProjectQuery, ProjectStats, UpdateProject};
use portal_models::volunteer::Volunteer;
use portal_models::MessageResponse;

/// Calls mounted at `/projects`.
///
/// ```text
/// GET    /projects/                                  -> list
/// POST   /projects/                                  -> create
/// GET    /projects/{id}                              -> get
/// PUT    /projects/{id}                              -> update
/// DELETE /projects/{id}                              -> delete
/// GET    /projects/{id}/volunteers                   -> volunteers
/// POST   /projects/{id}/volunteers/{volunteer_id}    -> assign_volunteer
/// DELETE /projects/{id}/volunteers/{volunteer_id}    -> remove_volunteer
/// GET    /projects/{id}/stats                        -> stats
/// ```
#[derive(Debug, Clone)]
pub struct ProjectsApi {
    client: HttpClient,
}

impl ProjectsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ProjectQuery) -> ApiResult<Vec<Project>> {
        self.client.get_query("/projects/", query).await
    }

    pub async fn get(&self, id: DbId) -> ApiResult<Project> {
        self.client.get(&format!("/projects/{id}")).await
    }

    pub async fn create(&self, project: &CreateProject) -> ApiResult<Project> {
        self.client.post("/projects/", project).await
    }

    pub async fn update(&self, id: DbId, update: &UpdateProject) -> ApiResult<Project> {
        self.client.put(&format!("/projects/{id}"), update).await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client.delete_unit(&format!("/projects/{id}")).await
    }

    pub async fn volunteers(&self, id: DbId) -> ApiResult<Vec<Volunteer>> {
        self.client.get(&format!("/projects/{id}/volunteers")).await
    }

    pub async fn assign_volunteer(&self, id: DbId, volunteer_id: DbId) -> ApiResult<MessageResponse> {
        self.client
            .post_empty(&format!("/projects/{id}/volunteers/{volunteer_id}"))
            .await
    }

    pub async fn remove_volunteer(&self, id: DbId, volunteer_id: DbId) -> ApiResult<()> {
        self.client
            .delete_unit(&format!("/projects/{id}/volunteers/{volunteer_id}"))
            .await
    }

    pub async fn stats(&self, id: DbId) -> ApiResult<ProjectStats> {
        self.client.get(&format!("/projects/{id}/stats")).await
    }
}
