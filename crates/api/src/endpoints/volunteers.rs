//! Typed calls for the `/volunteers` resource, including time logs.

use portal_client::HttpClient;
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::volunteer::{
    CreateTimeLog, CreateVolunteer, TimeLog, TimeLogReview, UpdateVolunteer, Volunteer,
    VolunteerQuery,
};

/// Calls mounted at `/volunteers`.
///
/// ```text
/// GET    /volunteers/                          -> list
/// POST   /volunteers/                          -> create
/// GET    /volunteers/me                        -> me
/// GET    /volunteers/{id}                      -> get_volunteer
/// PUT    /volunteers/{id}                      -> update
/// DELETE /volunteers/{id}                      -> delete
/// GET    /volunteers/{id}/hours                -> hours
/// POST   /volunteers/{id}/hours                -> log_hours
/// GET    /volunteers/hours/pending             -> pending_hours
/// POST   /volunteers/hours/{log_id}/review     -> approve_hours, reject_hours
/// ```
#[derive(Debug, Clone)]
pub struct VolunteersApi {
    client: HttpClient,
}

impl VolunteersApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &VolunteerQuery) -> ApiResult<Vec<Volunteer>> {
        self.client.get_query("/volunteers/", query).await
    }

    pub async fn get_volunteer(&self, id: DbId) -> ApiResult<Volunteer> {
        self.client.get(&format!("/volunteers/{id}")).await
    }

    /// Volunteer profile of the logged-in user.
    pub async fn me(&self) -> ApiResult<Volunteer> {
        self.client.get("/volunteers/me").await
    }

    pub async fn create(&self, volunteer: &CreateVolunteer) -> ApiResult<Volunteer> {
        self.client.post("/volunteers/", volunteer).await
    }

    pub async fn update(&self, id: DbId, update: &UpdateVolunteer) -> ApiResult<Volunteer> {
        self.client.put(&format!("/volunteers/{id}"), update).await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client.delete_unit(&format!("/volunteers/{id}")).await
    }

    pub async fn hours(&self, id: DbId) -> ApiResult<Vec<TimeLog>> {
        self.client.get(&format!("/volunteers/{id}/hours")).await
    }

    pub async fn log_hours(&self, id: DbId, log: &CreateTimeLog) -> ApiResult<TimeLog> {
        self.client.post(&format!("/volunteers/{id}/hours"), log).await
    }

    /// Time logs awaiting a coordinator's decision.
    pub async fn pending_hours(&self) -> ApiResult<Vec<TimeLog>> {
        self.client.get("/volunteers/hours/pending").await
    }

    pub async fn approve_hours(&self, log_id: DbId) -> ApiResult<TimeLog> {
        self.review(log_id, true).await
    }

    /// Reject a time log. The backend records only the decision; there is
    /// no field for a reason.
    pub async fn reject_hours(&self, log_id: DbId) -> ApiResult<TimeLog> {
        self.review(log_id, false).await
    }

    async fn review(&self, log_id: DbId, approved: bool) -> ApiResult<TimeLog> {
        self.client
            .post(
                &format!("/volunteers/hours/{log_id}/review"),
                &TimeLogReview { approved },
            )
            .await
    }
}
