//! Typed calls for the `/contact` resource.

use validator::Validate;

use portal_client::{HttpClient, Request};
use portal_core::ApiResult;
use portal_models::contact::{ContactForm, ContactMessage};
use portal_models::MessageResponse;

/// ```text
/// POST   /contact/             -> submit     (public)
/// GET    /contact/messages     -> messages
/// ```
#[derive(Debug, Clone)]
pub struct ContactApi {
    client: HttpClient,
}

impl ContactApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn submit(&self, form: &ContactForm) -> ApiResult<MessageResponse> {
        form.validate()?;
        self.client
            .send(Request::post("/contact/").json(form).skip_auth())
            .await
    }

    pub async fn messages(&self) -> ApiResult<Vec<ContactMessage>> {
        self.client.get("/contact/messages").await
    }
}
