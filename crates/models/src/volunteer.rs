//! Volunteer profile and time-log DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use portal_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolunteerStatus {
    Active,
    Inactive,
    Pending,
}

/// A volunteer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub status: VolunteerStatus,
    /// Approved hours only.
    #[serde(default)]
    pub total_hours: f64,
    pub joined_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVolunteer {
    pub user_id: DbId,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVolunteer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VolunteerStatus>,
}

/// Filters for `GET /volunteers/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VolunteerQuery {
    #[serde(flatten)]
    pub page: crate::Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VolunteerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLogStatus {
    Pending,
    Approved,
    Rejected,
}

/// Hours a volunteer logged against a project or task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLog {
    pub id: DbId,
    pub volunteer_id: DbId,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: Option<String>,
    pub status: TimeLogStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeLog {
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: Option<String>,
}

/// Body of `POST /volunteers/hours/{log_id}/review`.
///
/// Carries only the decision; the backend has no field for a rejection
/// reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLogReview {
    pub approved: bool,
}
