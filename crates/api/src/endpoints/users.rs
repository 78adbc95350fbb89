//! Typed calls for the `/users` resource (admin user management).

use portal_client::HttpClient;
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::user::{RoleUpdate, StatusUpdate, UpdateUser, User, UserQuery, UserRole};

/// Calls mounted at `/users`.
///
/// ```text
/// GET    /users/               -> list
/// PUT    /users/me             -> update_me
/// GET    /users/{id}           -> get
/// PUT    /users/{id}           -> update
/// DELETE /users/{id}           -> delete
/// PUT    /users/{id}/role      -> set_role
/// PUT    /users/{id}/status    -> set_active
/// ```
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: HttpClient,
}

impl UsersApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &UserQuery) -> ApiResult<Vec<User>> {
        self.client.get_query("/users/", query).await
    }

    pub async fn get(&self, id: DbId) -> ApiResult<User> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn update(&self, id: DbId, update: &UpdateUser) -> ApiResult<User> {
        self.client.put(&format!("/users/{id}"), update).await
    }

    /// Update the logged-in user's own profile.
    pub async fn update_me(&self, update: &UpdateUser) -> ApiResult<User> {
        self.client.put("/users/me", update).await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client.delete_unit(&format!("/users/{id}")).await
    }

    pub async fn set_role(&self, id: DbId, role: UserRole) -> ApiResult<User> {
        self.client
            .put(&format!("/users/{id}/role"), &RoleUpdate { role })
            .await
    }

    pub async fn set_active(&self, id: DbId, is_active: bool) -> ApiResult<User> {
        self.client
            .put(&format!("/users/{id}/status"), &StatusUpdate { is_active })
            .await
    }
}
