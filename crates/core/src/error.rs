use serde::{Serialize, Serializer};

/// Status code reported for failures that never produced an HTTP response.
pub const NO_STATUS: u16 = 0;

/// Errors produced by any call to the portal backend.
///
/// Every API path (JSON calls, multipart upload, raw export, the
/// notification stream) reports failures through this one type, so
/// callers can surface [`detail`](ApiError::detail) uniformly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, TLS, body IO).
    #[error("Transport error: {detail}")]
    Transport { detail: String },

    /// The backend answered with a status outside 2xx.
    #[error("HTTP {status_code}: {detail}")]
    Http {
        status_code: u16,
        /// Raw response body text. Not guaranteed to be JSON.
        detail: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response body (HTTP {status_code}): {detail}")]
    Decode { status_code: u16, detail: String },

    /// A request was rejected before being sent.
    #[error("Invalid request: {detail}")]
    Validation { detail: String },

    /// The event stream reported an error after it was opened.
    #[error("Stream error: {detail}")]
    Stream { detail: String },
}

/// Convenience alias for results of backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn http(status_code: u16, detail: impl Into<String>) -> Self {
        Self::Http {
            status_code,
            detail: detail.into(),
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    /// HTTP status associated with the failure, or `0` when no response
    /// was received.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http { status_code, .. } | Self::Decode { status_code, .. } => *status_code,
            Self::Transport { .. } | Self::Validation { .. } | Self::Stream { .. } => NO_STATUS,
        }
    }

    /// Human-readable detail, suitable for showing to a user.
    pub fn detail(&self) -> &str {
        match self {
            Self::Transport { detail }
            | Self::Http { detail, .. }
            | Self::Decode { detail, .. }
            | Self::Validation { detail }
            | Self::Stream { detail } => detail,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status_code: 401, .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status_code: 404, .. })
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::validation(errors.to_string())
    }
}

/// Serializes as `{"detail": ..., "status_code": ...}`, the shape the
/// backend itself uses for error bodies.
impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            detail: &'a str,
            status_code: u16,
        }

        Wire {
            detail: self.detail(),
            status_code: self.status_code(),
        }
        .serialize(serializer)
    }
}
