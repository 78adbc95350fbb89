//! Generic HTTP client for the portal REST backend.
//!
//! Every backend call goes through [`HttpClient`]: it resolves the
//! endpoint against the configured base URL, attaches the session's
//! bearer token, (de)serializes JSON, and maps every failure to an
//! [`ApiError`].

use std::path::Path;
use std::sync::Arc;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use portal_core::{ApiError, ApiResult};

use crate::config::ClientConfig;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single backend call, built up before it is handed to
/// [`HttpClient::send`].
///
/// Serialization problems in [`query`](Self::query) or
/// [`json`](Self::json) are held back and reported when the request is
/// sent.
#[derive(Debug)]
pub struct Request {
    method: Method,
    endpoint: String,
    query: Vec<(String, String)>,
    body: Option<Body>,
    accept: &'static str,
    skip_auth: bool,
    error: Option<ApiError>,
}

#[derive(Debug)]
enum Body {
    Json(serde_json::Value),
    Multipart(Form),
}

impl Request {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            accept: "application/json",
            skip_auth: false,
            error: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Append query parameters from a serializable struct or map.
    ///
    /// `null` fields are omitted; scalars are rendered as plain text.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        match query_pairs(query) {
            Ok(pairs) => self.query.extend(pairs),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Append a single query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Send `body` as a JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(Body::Json(value)),
            Err(e) => self.error = Some(ApiError::validation(e.to_string())),
        }
        self
    }

    /// Send a `multipart/form-data` body.
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(Body::Multipart(form));
        self
    }

    /// Override the `Accept` header (default `application/json`).
    pub fn accept(mut self, mime: &'static str) -> Self {
        self.accept = mime;
        self
    }

    /// Do not attach the session's bearer token (public endpoints).
    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Flatten a serializable value into query pairs.
fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> ApiResult<Vec<(String, String)>> {
    let value = serde_json::to_value(query).map_err(|e| ApiError::validation(e.to_string()))?;
    let map = match value {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ApiError::validation(format!(
                "query parameters must be an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::String(s) => pairs.push((key, s)),
            serde_json::Value::Bool(b) => pairs.push((key, b.to_string())),
            serde_json::Value::Number(n) => pairs.push((key, n.to_string())),
            other => {
                return Err(ApiError::validation(format!(
                    "query parameter `{key}` must be a scalar, got {other}"
                )))
            }
        }
    }
    Ok(pairs)
}

/// Percent-encode a caller-supplied string for use as one path segment.
pub fn encode_segment(segment: &str) -> String {
    let Ok(mut url) = reqwest::Url::parse("http://segment.invalid/") else {
        return segment.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// Raw body of a non-JSON response (exports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// Suggested file name from `Content-Disposition`, if the backend sent one.
    pub filename: Option<String>,
}

/// File name suggested by `Content-Disposition`, reduced to its final
/// component so it can never point outside the caller's directory.
fn disposition_filename(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    value.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .and_then(|name| base_name(name.trim_matches('"')))
    })
}

fn base_name(name: &str) -> Option<String> {
    let name = name.replace('\\', "/");
    Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// HttpClient
// ---------------------------------------------------------------------------

/// HTTP client for the portal backend.
///
/// Cheap to clone; clones share the connection pool and the [`Session`].
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Arc<str>,
    user_agent: Arc<str>,
    session: Session,
}

impl HttpClient {
    /// Create a client for the configured backend using `session` for
    /// credentials.
    pub fn new(config: &ClientConfig, session: Session) -> Self {
        Self::with_client(reqwest::Client::new(), config, session)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig, session: Session) -> Self {
        Self {
            client,
            base_url: Arc::from(config.base_url.as_str()),
            user_agent: Arc::from(config.user_agent.as_str()),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `/projects/`.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    // ---- typed JSON verbs ----

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send(Request::get(endpoint)).await
    }

    pub async fn get_query<T, Q>(&self, endpoint: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(Request::get(endpoint).query(query)).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Request::post(endpoint).json(body)).await
    }

    /// `POST` without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send(Request::post(endpoint)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Request::put(endpoint).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send(Request::delete(endpoint)).await
    }

    /// `DELETE` where the response body carries nothing of interest.
    pub async fn delete_unit(&self, endpoint: &str) -> ApiResult<()> {
        self.send_unit(Request::delete(endpoint)).await
    }

    // ---- general forms ----

    /// Send a request and decode the JSON response body into `T`.
    ///
    /// An empty or malformed body on a 2xx response is an
    /// [`ApiError::Decode`], never a silently defaulted value.
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let response = self.execute(request).await?;
        Self::parse_response(response).await
    }

    /// Send a request, require a 2xx status, and discard the body.
    pub async fn send_unit(&self, request: Request) -> ApiResult<()> {
        self.execute(request).await?;
        Ok(())
    }

    /// `POST` a multipart form and decode the JSON response.
    pub async fn upload<T: DeserializeOwned>(&self, endpoint: &str, form: Form) -> ApiResult<T> {
        self.send(Request::post(endpoint).multipart(form)).await
    }

    /// Send a request and return the raw response body.
    pub async fn download(&self, request: Request) -> ApiResult<Download> {
        let response = self.execute(request).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = disposition_filename(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        Ok(Download {
            bytes: bytes.to_vec(),
            content_type,
            filename,
        })
    }

    /// Send a request and hand back the open response for incremental
    /// reading. The status has already been checked.
    pub async fn open_stream(&self, request: Request) -> ApiResult<reqwest::Response> {
        self.execute(request).await
    }

    // ---- private helpers ----

    /// Build and send the request, mapping transport and status failures.
    async fn execute(&self, request: Request) -> ApiResult<reqwest::Response> {
        let Request {
            method,
            endpoint,
            query,
            body,
            accept,
            skip_auth,
            error,
        } = request;

        if let Some(err) = error {
            return Err(err);
        }

        let mut builder = self
            .client
            .request(method.clone(), self.url(&endpoint))
            .header(USER_AGENT, &*self.user_agent)
            .header(ACCEPT, accept);

        if !query.is_empty() {
            builder = builder.query(&query);
        }

        builder = match body {
            Some(Body::Json(value)) => builder.json(&value),
            Some(Body::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        if !skip_auth {
            if let Some(token) = self.session.access_token() {
                builder = builder.bearer_auth(token);
            }
        }

        tracing::debug!(%method, path = %endpoint, "Sending request");

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, path = %endpoint, error = %e, "Request failed");
            ApiError::transport(e.to_string())
        })?;

        Self::ensure_success(&method, &endpoint, response).await
    }

    /// Returns the response unchanged on a 2xx status, or an
    /// [`ApiError::Http`] containing the status and raw body text.
    async fn ensure_success(
        method: &Method,
        endpoint: &str,
        response: reqwest::Response,
    ) -> ApiResult<reqwest::Response> {
        let status = response.status();
        tracing::debug!(%method, path = %endpoint, status = status.as_u16(), "Received response");

        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                %method,
                path = %endpoint,
                status = status.as_u16(),
                detail = %detail,
                "Backend returned an error status"
            );
            return Err(ApiError::http(status.as_u16(), detail));
        }
        Ok(response)
    }

    /// Decode a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status_code = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ApiError::Decode {
                status_code,
                detail: "empty response body".to_string(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            status_code,
            detail: e.to_string(),
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
