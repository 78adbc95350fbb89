//! Typed calls for the `/auth` resource.
//!
//! Token storage is not handled here; see
//! [`AuthSession`](crate::AuthSession) for the login/logout flow.

use validator::Validate;

use portal_client::{HttpClient, Request};
use portal_core::ApiResult;
use portal_models::auth::{
    AuthStatus, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RefreshRequest,
    RegisterRequest, ResetPasswordRequest, TokenResponse,
};
use portal_models::user::User;
use portal_models::MessageResponse;

/// Calls mounted at `/auth`.
///
/// ```text
/// POST   /auth/login             -> login            (public)
/// POST   /auth/register          -> register         (public)
/// POST   /auth/refresh           -> refresh          (public)
/// GET    /auth/me                -> me
/// GET    /auth/status            -> status
/// POST   /auth/change-password   -> change_password
/// POST   /auth/forgot-password   -> forgot_password  (public)
/// POST   /auth/reset-password    -> reset_password   (public)
/// ```
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: HttpClient,
}

impl AuthApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<TokenResponse> {
        credentials.validate()?;
        self.client
            .send(Request::post("/auth/login").json(credentials).skip_auth())
            .await
    }

    pub async fn register(&self, account: &RegisterRequest) -> ApiResult<User> {
        account.validate()?;
        self.client
            .send(Request::post("/auth/register").json(account).skip_auth())
            .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenResponse> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.client
            .send(Request::post("/auth/refresh").json(&body).skip_auth())
            .await
    }

    /// Profile of the user owning the current access token.
    pub async fn me(&self) -> ApiResult<User> {
        self.client.get("/auth/me").await
    }

    pub async fn status(&self) -> ApiResult<AuthStatus> {
        self.client.get("/auth/status").await
    }

    pub async fn change_password(&self, change: &ChangePasswordRequest) -> ApiResult<MessageResponse> {
        change.validate()?;
        self.client.post("/auth/change-password", change).await
    }

    /// Ask the backend to email a reset link.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<MessageResponse> {
        let body = ForgotPasswordRequest {
            email: email.to_string(),
        };
        body.validate()?;
        self.client
            .send(Request::post("/auth/forgot-password").json(&body).skip_auth())
            .await
    }

    pub async fn reset_password(&self, reset: &ResetPasswordRequest) -> ApiResult<MessageResponse> {
        reset.validate()?;
        self.client
            .send(Request::post("/auth/reset-password").json(reset).skip_auth())
            .await
    }
}
