//! Dashboard and analytics DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_volunteers: u32,
    pub active_volunteers: u32,
    pub total_projects: u32,
    pub active_projects: u32,
    pub total_hours: f64,
    pub pending_hours: u32,
    pub tasks_completed: u32,
}

/// Inclusive date window used by the analytics endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerAnalytics {
    pub new_volunteers: u32,
    pub retention_rate: f64,
    pub average_hours: f64,
    #[serde(default)]
    pub top_skills: Vec<SkillCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalytics {
    pub completed_projects: u32,
    pub completion_rate: f64,
    pub average_volunteers_per_project: f64,
    #[serde(default)]
    pub by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HoursQuery {
    #[serde(flatten)]
    pub range: DateRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Granularity>,
}

/// One bucket of the hours time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursDataPoint {
    pub period: String,
    pub hours: f64,
    pub volunteers: u32,
}
