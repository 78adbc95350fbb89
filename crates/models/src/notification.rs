//! In-app notification DTOs.
//!
//! [`Notification`] is also the payload of `notification` events on the
//! live stream.

use serde::{Deserialize, Serialize};

use portal_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    /// Backend category, e.g. `"task_assigned"` or `"hours_approved"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    /// Optional in-app link the notification points at.
    pub link: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    pub count: u32,
}
