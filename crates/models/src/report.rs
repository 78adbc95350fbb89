//! Generated report and export DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};

use portal_core::types::{DbId, Timestamp};

use crate::analytics::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    VolunteerHours,
    ProjectSummary,
    Impact,
    Engagement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: DbId,
    pub title: String,
    pub kind: ReportKind,
    pub status: ReportStatus,
    /// Report body once `status` is `ready`.
    pub data: Option<serde_json::Value>,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub title: String,
    pub kind: ReportKind,
    #[serde(flatten)]
    pub range: DateRange,
    pub project_id: Option<DbId>,
}

/// Dataset exposed under `/reports/export/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Volunteers,
    Projects,
    Tasks,
    Hours,
}

impl ExportKind {
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Volunteers => "volunteers",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Hours => "hours",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportQuery {
    pub format: ExportFormat,
    #[serde(flatten)]
    pub range: DateRange,
}
