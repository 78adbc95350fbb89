//! Badges, points and leaderboard DTOs.

use serde::{Deserialize, Serialize};

use portal_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    /// Points granted when the badge is awarded.
    pub points: u32,
    /// Free-form rule the backend evaluates, e.g. `{"hours": 100}`.
    pub criteria: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBadge {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub points: u32,
    pub criteria: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBadge {
    pub user_id: DbId,
    pub badge: Badge,
    pub awarded_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    Week,
    Month,
    Year,
    AllTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: DbId,
    pub full_name: String,
    pub points: u32,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub badge_count: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaderboardQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<LeaderboardPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsSummary {
    pub total_points: u32,
    pub level: u32,
    /// Points still needed to reach `level + 1`.
    pub points_to_next_level: u32,
    pub rank: Option<u32>,
}
