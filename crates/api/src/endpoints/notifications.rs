//! Typed calls for the `/notifications` resource, including the live feed.

use portal_client::{HttpClient, Request};
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_events::NotificationStream;
use portal_models::notification::{Notification, NotificationQuery, UnreadCount};
use portal_models::MessageResponse;

/// Calls mounted at `/notifications`.
///
/// ```text
/// GET    /notifications/                -> list
/// GET    /notifications/unread-count    -> unread_count
/// PUT    /notifications/{id}/read       -> mark_read
/// PUT    /notifications/read-all        -> mark_all_read
/// DELETE /notifications/{id}            -> delete
/// GET    /notifications/stream          -> subscribe     (SSE, ?token=)
/// ```
#[derive(Debug, Clone)]
pub struct NotificationsApi {
    client: HttpClient,
}

impl NotificationsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &NotificationQuery) -> ApiResult<Vec<Notification>> {
        self.client.get_query("/notifications/", query).await
    }

    pub async fn unread_count(&self) -> ApiResult<UnreadCount> {
        self.client.get("/notifications/unread-count").await
    }

    pub async fn mark_read(&self, id: DbId) -> ApiResult<Notification> {
        self.client
            .send(Request::put(format!("/notifications/{id}/read")))
            .await
    }

    pub async fn mark_all_read(&self) -> ApiResult<MessageResponse> {
        self.client
            .send(Request::put("/notifications/read-all"))
            .await
    }

    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        self.client
            .delete_unit(&format!("/notifications/{id}"))
            .await
    }

    /// Open the live notification feed for the current session.
    ///
    /// See [`NotificationStream`] for the event model and shutdown.
    pub async fn subscribe(&self) -> ApiResult<NotificationStream> {
        NotificationStream::subscribe(&self.client).await
    }
}
