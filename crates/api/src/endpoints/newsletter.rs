//! Typed calls for the `/newsletter` resource.

use validator::Validate;

use portal_client::{HttpClient, Request};
use portal_core::ApiResult;
use portal_models::newsletter::{
    NewsletterIssue, NewsletterSubscribe, NewsletterUnsubscribe, Subscriber,
};
use portal_models::MessageResponse;

/// Calls mounted at `/newsletter`.
///
/// ```text
/// POST   /newsletter/subscribe      -> subscribe     (public)
/// POST   /newsletter/unsubscribe    -> unsubscribe   (public)
/// GET    /newsletter/subscribers    -> subscribers
/// POST   /newsletter/send           -> send
/// ```
#[derive(Debug, Clone)]
pub struct NewsletterApi {
    client: HttpClient,
}

impl NewsletterApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn subscribe(&self, request: &NewsletterSubscribe) -> ApiResult<MessageResponse> {
        request.validate()?;
        self.client
            .send(Request::post("/newsletter/subscribe").json(request).skip_auth())
            .await
    }

    pub async fn unsubscribe(&self, email: &str) -> ApiResult<MessageResponse> {
        let body = NewsletterUnsubscribe {
            email: email.to_string(),
        };
        body.validate()?;
        self.client
            .send(Request::post("/newsletter/unsubscribe").json(&body).skip_auth())
            .await
    }

    pub async fn subscribers(&self) -> ApiResult<Vec<Subscriber>> {
        self.client.get("/newsletter/subscribers").await
    }

    /// Send an issue to every active subscriber (admin only).
    pub async fn send(&self, issue: &NewsletterIssue) -> ApiResult<MessageResponse> {
        issue.validate()?;
        self.client.post("/newsletter/send", issue).await
    }
}
