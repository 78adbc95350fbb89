use std::path::PathBuf;

/// Backend used when neither URL variable is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for talking to a local backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    /// Where to persist the token pair. `None` keeps tokens in memory only.
    pub token_file: Option<PathBuf>,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Build a config for an explicit base URL with in-memory tokens.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            token_file: None,
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                  |
    /// |-----------------------|--------------------------|
    /// | `PORTAL_API_URL`      | (unset)                  |
    /// | `NEXT_PUBLIC_API_URL` | `http://localhost:8000`  |
    /// | `PORTAL_TOKEN_FILE`   | (unset, memory only)     |
    ///
    /// `PORTAL_API_URL` wins over `NEXT_PUBLIC_API_URL` when both are set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("PORTAL_API_URL")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| lookup("NEXT_PUBLIC_API_URL").filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_file = lookup("PORTAL_TOKEN_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            base_url: normalize_base_url(&base_url),
            token_file,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn default_user_agent() -> String {
    format!("portal-client/{}", env!("CARGO_PKG_VERSION"))
}
