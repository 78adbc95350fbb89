//! Typed calls for the `/gamification` resource.

use portal_client::HttpClient;
use portal_core::types::DbId;
use portal_core::ApiResult;
use portal_models::gamification::{
    Badge, CreateBadge, LeaderboardEntry, LeaderboardQuery, PointsSummary, UserBadge,
};

/// Calls mounted at `/gamification`.
///
/// ```text
/// GET    /gamification/badges                           -> badges
/// POST   /gamification/badges                           -> create_badge
/// POST   /gamification/badges/{badge_id}/award/{user}   -> award_badge
/// GET    /gamification/users/{user_id}/badges           -> user_badges
/// GET    /gamification/leaderboard                      -> leaderboard
/// GET    /gamification/me/points                        -> my_points
/// ```
#[derive(Debug, Clone)]
pub struct GamificationApi {
    client: HttpClient,
}

impl GamificationApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn badges(&self) -> ApiResult<Vec<Badge>> {
        self.client.get("/gamification/badges").await
    }

    pub async fn create_badge(&self, badge: &CreateBadge) -> ApiResult<Badge> {
        self.client.post("/gamification/badges", badge).await
    }

    pub async fn award_badge(&self, badge_id: DbId, user_id: DbId) -> ApiResult<UserBadge> {
        self.client
            .post_empty(&format!("/gamification/badges/{badge_id}/award/{user_id}"))
            .await
    }

    pub async fn user_badges(&self, user_id: DbId) -> ApiResult<Vec<UserBadge>> {
        self.client
            .get(&format!("/gamification/users/{user_id}/badges"))
            .await
    }

    pub async fn leaderboard(&self, query: &LeaderboardQuery) -> ApiResult<Vec<LeaderboardEntry>> {
        self.client.get_query("/gamification/leaderboard", query).await
    }

    pub async fn my_points(&self) -> ApiResult<PointsSummary> {
        self.client.get("/gamification/me/points").await
    }
}
