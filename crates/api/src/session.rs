//! Current-user view over the auth endpoints.
//!
//! [`AuthSession`] keeps two cached reads, the profile (`/auth/me`) and the
//! auth status (`/auth/status`), and derives "is someone logged in" from
//! them. Read failures are kept as state and never returned; mutation
//! failures (login, register, ...) are returned to the caller.
//!
//! Session changes are announced on an [`EventBus`] so other parts of an
//! application (a notification feed, say) can follow them.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::broadcast;

use portal_client::Session;
use portal_core::types::DbId;
use portal_core::{ApiError, ApiResult};
use portal_events::EventBus;
use portal_models::auth::{
    AuthStatus, ChangePasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    TokenResponse,
};
use portal_models::user::User;
use portal_models::MessageResponse;

use crate::cache::Cached;
use crate::endpoints::auth::AuthApi;

/// Published whenever the stored credentials change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Tokens stored after a login. `user_id` is `None` if the profile
    /// could not be loaded afterwards.
    LoggedIn { user_id: Option<DbId> },
    LoggedOut,
    /// The access token was exchanged for a fresh pair.
    Refreshed,
}

/// Cached "current user" view plus the session mutations.
///
/// Cheap to clone; clones share the cache and the event bus.
#[derive(Clone)]
pub struct AuthSession {
    api: AuthApi,
    profile: Arc<Cached<User>>,
    status: Arc<Cached<AuthStatus>>,
    events: Arc<EventBus<SessionEvent>>,
}

impl AuthSession {
    pub fn new(api: AuthApi) -> Self {
        let me = api.clone();
        let profile = Cached::new(move || {
            let api = me.clone();
            async move { api.me().await }.boxed()
        });

        let st = api.clone();
        let status = Cached::new(move || {
            let api = st.clone();
            async move { api.status().await }.boxed()
        });

        Self {
            api,
            profile: Arc::new(profile),
            status: Arc::new(status),
            events: Arc::new(EventBus::default()),
        }
    }

    pub fn session(&self) -> &Session {
        self.api.client().session()
    }

    // ---- reads ----

    /// The logged-in user's profile, if the last profile read produced one.
    pub async fn user(&self) -> Option<User> {
        self.profile.get().await.data
    }

    pub async fn status(&self) -> Option<AuthStatus> {
        self.status.get().await.data
    }

    /// Error from the last profile read, if it failed.
    pub async fn error(&self) -> Option<ApiError> {
        self.profile.get().await.error
    }

    /// `true` iff the profile read produced a user and reported no error.
    pub async fn is_authenticated(&self) -> bool {
        let state = self.profile.get().await;
        state.data.is_some() && state.error.is_none()
    }

    /// Refetch both reads.
    pub async fn revalidate(&self) {
        tokio::join!(self.profile.revalidate(), self.status.revalidate());
    }

    // ---- mutations ----

    /// Log in, store the returned tokens, and refresh both reads before
    /// returning.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<TokenResponse> {
        let tokens = self.api.login(credentials).await?;
        self.store_tokens(&tokens);
        self.revalidate().await;

        let user_id = self.profile.state().await.data.map(|user| user.id);
        tracing::info!(?user_id, "Logged in");
        self.events.publish(SessionEvent::LoggedIn { user_id });
        Ok(tokens)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, account: &RegisterRequest) -> ApiResult<User> {
        self.api.register(account).await
    }

    /// Forget the stored tokens. The profile is cleared immediately; the
    /// status is refetched.
    pub async fn logout(&self) {
        if let Err(e) = self.session().clear_auth_token() {
            tracing::warn!(error = %e, "Failed to clear stored tokens");
        }
        self.profile.mutate(None, false).await;
        self.status.revalidate().await;

        tracing::info!("Logged out");
        self.events.publish(SessionEvent::LoggedOut);
    }

    pub async fn change_password(&self, change: &ChangePasswordRequest) -> ApiResult<MessageResponse> {
        self.api.change_password(change).await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<MessageResponse> {
        self.api.forgot_password(email).await
    }

    pub async fn reset_password(&self, reset: &ResetPasswordRequest) -> ApiResult<MessageResponse> {
        self.api.reset_password(reset).await
    }

    /// Exchange the stored refresh token for a new pair and reload the
    /// profile.
    pub async fn refresh(&self) -> ApiResult<TokenResponse> {
        let refresh_token = self
            .session()
            .refresh_token()
            .ok_or_else(|| ApiError::validation("no refresh token stored"))?;

        let tokens = self.api.refresh(&refresh_token).await?;
        self.store_tokens(&tokens);
        self.profile.revalidate().await;

        tracing::debug!("Session refreshed");
        self.events.publish(SessionEvent::Refreshed);
        Ok(tokens)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn store_tokens(&self, tokens: &TokenResponse) {
        if let Err(e) = self
            .session()
            .set_auth_token(&tokens.access_token, Some(&tokens.refresh_token))
        {
            tracing::warn!(error = %e, "Failed to persist tokens");
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("session", self.session())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use portal_client::{ClientConfig, HttpClient};

    use super::*;

    fn offline_session() -> AuthSession {
        let client = HttpClient::new(&ClientConfig::new("http://127.0.0.1:9"), Session::in_memory());
        AuthSession::new(AuthApi::new(client))
    }

    #[tokio::test]
    async fn refresh_without_token_is_rejected() {
        let auth = offline_session();
        let err = auth.refresh().await.unwrap_err();
        assert_matches!(err, ApiError::Validation { .. });
    }

    #[tokio::test]
    async fn unreachable_backend_reads_as_logged_out() {
        let auth = offline_session();

        assert!(!auth.is_authenticated().await);
        assert_eq!(auth.user().await, None);
        assert_eq!(auth.error().await.map(|e| e.status_code()), Some(0));
    }

    #[tokio::test]
    async fn logout_clears_tokens_and_announces() {
        let auth = offline_session();
        auth.session().set_auth_token("AT1", Some("RT1")).unwrap();
        let mut events = auth.subscribe();

        auth.logout().await;

        assert!(!auth.session().has_token());
        assert_eq!(auth.user().await, None);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
    }

    #[tokio::test]
    async fn invalid_login_is_rejected_before_sending() {
        let auth = offline_session();
        let err = auth
            .login(&LoginRequest::new("not-an-email", "x"))
            .await
            .unwrap_err();
        assert_matches!(err, ApiError::Validation { .. });
        assert!(!auth.session().has_token());
    }
}
