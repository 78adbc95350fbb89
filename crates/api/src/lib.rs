//! Typed API tables for the portal backend.
//!
//! [`PortalApi`] bundles one table per backend resource, all sharing a
//! single [`HttpClient`]. Each table maps endpoints one-to-one onto async
//! methods; failures are exactly the client's [`ApiError`]s.
//!
//! [`AuthSession`] layers a cached "current user" view and the session
//! mutations (login, logout, ...) on top of [`AuthApi`].
//!
//! ```no_run
//! use portal_api::PortalApi;
//! use portal_client::{ClientConfig, HttpClient, Session};
//!
//! # async fn run() -> portal_core::ApiResult<()> {
//! let client = HttpClient::new(&ClientConfig::from_env(), Session::in_memory());
//! let api = PortalApi::new(client);
//! let volunteer = api.volunteers().get_volunteer(42).await?;
//! println!("{}", volunteer.full_name);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod endpoints;
pub mod session;

pub use endpoints::analytics::AnalyticsApi;
pub use endpoints::auth::AuthApi;
pub use endpoints::blog::BlogApi;
pub use endpoints::contact::ContactApi;
pub use endpoints::files::{FileUpload, FilesApi};
pub use endpoints::gamification::GamificationApi;
pub use endpoints::newsletter::NewsletterApi;
pub use endpoints::notifications::NotificationsApi;
pub use endpoints::projects::ProjectsApi;
pub use endpoints::reports::ReportsApi;
pub use endpoints::resources::ResourcesApi;
pub use endpoints::search::SearchApi;
pub use endpoints::tasks::TasksApi;
pub use endpoints::users::UsersApi;
pub use endpoints::volunteers::VolunteersApi;
pub use session::{AuthSession, SessionEvent};

pub use portal_client::{ClientConfig, HttpClient, Session};
pub use portal_core::{ApiError, ApiResult};

/// All resource tables over one shared [`HttpClient`].
///
/// Cheap to clone. Tables are constructed on access; they hold nothing
/// but a client handle.
#[derive(Debug, Clone)]
pub struct PortalApi {
    client: HttpClient,
}

impl PortalApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }

    pub fn blog(&self) -> BlogApi {
        BlogApi::new(self.client.clone())
    }

    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi::new(self.client.clone())
    }

    pub fn tasks(&self) -> TasksApi {
        TasksApi::new(self.client.clone())
    }

    pub fn volunteers(&self) -> VolunteersApi {
        VolunteersApi::new(self.client.clone())
    }

    pub fn gamification(&self) -> GamificationApi {
        GamificationApi::new(self.client.clone())
    }

    pub fn analytics(&self) -> AnalyticsApi {
        AnalyticsApi::new(self.client.clone())
    }

    pub fn reports(&self) -> ReportsApi {
        ReportsApi::new(self.client.clone())
    }

    pub fn resources(&self) -> ResourcesApi {
        ResourcesApi::new(self.client.clone())
    }

    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.client.clone())
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.client.clone())
    }

    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.client.clone())
    }

    pub fn newsletter(&self) -> NewsletterApi {
        NewsletterApi::new(self.client.clone())
    }

    pub fn contact(&self) -> ContactApi {
        ContactApi::new(self.client.clone())
    }

    pub fn files(&self) -> FilesApi {
        FilesApi::new(self.client.clone())
    }

    /// A fresh [`AuthSession`] over this client. Keep one per application;
    /// each holds its own cache.
    pub fn auth_session(&self) -> AuthSession {
        AuthSession::new(self.auth())
    }
}
