//! Typed calls for the `/tasks` resource.

use portal_client::HttpClient;
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::task::{
    CreateTask, Task, TaskAssignment, TaskComment, TaskQuery, TaskStatus, TaskStatusUpdate,
    UpdateTask,
};
use portal_models::NewComment;

/// Calls mounted at `/tasks`.
///
/// ```text
/// GET    /tasks/                   -> list
/// POST   /tasks/                   -> create
/// GET    /tasks/{id}               -> get
/// PUT    /tasks/{id}               -> update
/// DELETE /tasks/{id}               -> delete
/// PUT    /tasks/{id}/status        -> update_status
/// POST   /tasks/{id}/assign        -> assign
/// GET    /tasks/{id}/comments      -> list_comments
/// POST   /tasks/{id}/comments      -> add_comment
/// ```
#[derive(Debug, Clone)]
pub struct TasksApi {
    client: HttpClient,
}

impl TasksApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &TaskQuery) -> ApiResult<Vec<Task>> {
        self.client.get_query("/tasks/", query).await
    }

    pub async fn get(&self, id: DbId) -> ApiResult<Task> {
        self.client.get(&format!("/tasks/{id}")).await
    }

    pub async fn create(&self, task: &CreateTask) -> ApiResult<Task> {
        self.client.post("/tasks/", task).await
    }

    pub async fn update(&self, id: DbId, update: &UpdateTask) -> ApiResult<Task> {
        self.client.put(&format!("/tasks/{id}"), update).await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client.delete_unit(&format!("/tasks/{id}")).await
    }

    pub async fn update_status(&self, id: DbId, status: TaskStatus) -> ApiResult<Task> {
        self.client
            .put(&format!("/tasks/{id}/status"), &TaskStatusUpdate { status })
            .await
    }

    pub async fn assign(&self, id: DbId, volunteer_id: DbId) -> ApiResult<Task> {
        self.client
            .post(&format!("/tasks/{id}/assign"), &TaskAssignment { volunteer_id })
            .await
    }

    pub async fn list_comments(&self, id: DbId) -> ApiResult<Vec<TaskComment>> {
        self.client.get(&format!("/tasks/{id}/comments")).await
    }

    pub async fn add_comment(&self, id: DbId, content: &str) -> ApiResult<TaskComment> {
        let body = NewComment {
            content: content.to_string(),
        };
        self.client.post(&format!("/tasks/{id}/comments"), &body).await
    }
}
