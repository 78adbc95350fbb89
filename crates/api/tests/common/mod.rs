//! Shared helpers for the integration tests: an in-process mock backend
//! that records every request it sees, plus JSON fixtures.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};

use portal_api::PortalApi;
use portal_client::{ClientConfig, HttpClient, Session};

/// One request as received by the mock backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

/// Requests seen by the mock backend, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }

    /// Most recent request to `path`.
    pub fn find(&self, path: &str) -> Option<Recorded> {
        self.requests().into_iter().rev().find(|r| r.path == path)
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let entry = {
        let header = |name| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Recorded {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: header(AUTHORIZATION),
            content_type: header(CONTENT_TYPE),
        }
    };
    recorder.0.lock().unwrap().push(entry);
    next.run(request).await
}

/// Serve `router` on an ephemeral local port. Returns the base URL and the
/// request recorder.
pub async fn spawn(router: Router) -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = router.layer(middleware::from_fn_with_state(recorder.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), recorder)
}

/// Client with an empty in-memory session.
pub fn client(base_url: &str) -> HttpClient {
    HttpClient::new(&ClientConfig::new(base_url), Session::in_memory())
}

/// Client whose session already holds `token`.
pub fn authed_client(base_url: &str, token: &str) -> HttpClient {
    let client = client(base_url);
    client.session().set_auth_token(token, None).unwrap();
    client
}

pub fn api(base_url: &str) -> PortalApi {
    PortalApi::new(client(base_url))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user_json(id: i64) -> Value {
    json!({
        "id": id,
        "email": "a@b.com",
        "full_name": "Ada Byron",
        "role": "admin",
        "is_active": true,
        "avatar_url": null,
        "created_at": "2024-01-15T09:30:00Z",
        "last_login_at": null
    })
}

pub fn volunteer_json(id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 7,
        "full_name": "Grace Hopper",
        "email": "grace@example.org",
        "phone": "+44 20 7946 0000",
        "skills": ["first aid", "driving"],
        "status": "active",
        "total_hours": 42.5,
        "joined_at": "2023-06-01T12:00:00Z"
    })
}

pub fn notification_json(id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "title": "Hours approved",
        "message": "Your 3 hours on River Clean-up were approved",
        "type": "hours_approved",
        "is_read": false,
        "link": "/volunteers/me",
        "created_at": "2024-05-01T10:00:00Z"
    })
}

pub fn time_log_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "volunteer_id": 3,
        "project_id": 2,
        "task_id": null,
        "date": "2024-04-30",
        "hours": 3.0,
        "description": "River clean-up",
        "status": status,
        "notes": null,
        "created_at": "2024-05-01T08:00:00Z"
    })
}
