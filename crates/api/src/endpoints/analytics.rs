//! Typed calls for the `/analytics` resource.

use portal_client::HttpClient;
use portal_core::ApiResult;
use portal_models::analytics::{
    DashboardStats, DateRange, HoursDataPoint, HoursQuery, ProjectAnalytics, VolunteerAnalytics,
};

/// Calls mounted at `/analytics`.
///
/// ```text
/// GET    /analytics/dashboard     -> dashboard
/// GET    /analytics/volunteers    -> volunteers
/// GET    /analytics/projects      -> projects
/// GET    /analytics/hours         -> hours
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticsApi {
    client: HttpClient,
}

impl AnalyticsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> ApiResult<DashboardStats> {
        self.client.get("/analytics/dashboard").await
    }

    pub async fn volunteers(&self, range: &DateRange) -> ApiResult<VolunteerAnalytics> {
        self.client.get_query("/analytics/volunteers", range).await
    }

    pub async fn projects(&self, range: &DateRange) -> ApiResult<ProjectAnalytics> {
        self.client.get_query("/analytics/projects", range).await
    }

    /// Hours time series, bucketed by `query.period`.
    pub async fn hours(&self, query: &HoursQuery) -> ApiResult<Vec<HoursDataPoint>> {
        self.client.get_query("/analytics/hours", query).await
    }
}
