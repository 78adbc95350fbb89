//! Contract tests for `HttpClient` against an in-process mock backend.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use portal_client::Request;
use portal_core::ApiError;

fn echo_router() -> Router {
    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    Router::new()
        .route(
            "/items",
            get(|| async { Json(json!([{"id": 1, "name": "rake"}, {"id": 2, "name": "gloves"}])) })
                .post(echo)
                .put(echo),
        )
        .route(
            "/items/{id}",
            axum::routing::delete(|| async { Json(json!({"message": "deleted"})) }),
        )
        .route(
            "/volunteers/999",
            get(|| async { (StatusCode::NOT_FOUND, "Not Found") }),
        )
        .route(
            "/validation",
            axum::routing::post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#,
                )
            }),
        )
        .route("/empty", get(|| async { StatusCode::OK }))
        .route("/html", get(|| async { "<html>maintenance</html>" }))
        .route("/whoami", get(|| async { Json(json!({"ok": true})) }))
}

// ---------------------------------------------------------------------------
// Test: successful JSON responses come back unchanged for every verb
// ---------------------------------------------------------------------------

#[tokio::test]
async fn json_bodies_round_trip_for_all_verbs() {
    let (base, _) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let listed: Value = client.get("/items").await.unwrap();
    assert_eq!(listed, json!([{"id": 1, "name": "rake"}, {"id": 2, "name": "gloves"}]));

    let payload = json!({
        "title": "Spring planting",
        "tags": ["outdoor", "family"],
        "nested": {"max_volunteers": 12, "indoor": false, "notes": null}
    });
    let posted: Value = client.post("/items", &payload).await.unwrap();
    assert_eq!(posted, payload);

    let put: Value = client.put("/items", &payload).await.unwrap();
    assert_eq!(put, payload);

    let deleted: Value = client.delete("/items/1").await.unwrap();
    assert_eq!(deleted, json!({"message": "deleted"}));
}

#[tokio::test]
async fn repeated_gets_return_equal_values() {
    let (base, recorder) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let first: Value = client.get("/items").await.unwrap();
    let second: Value = client.get("/items").await.unwrap();

    assert_eq!(first, second);
    // Nothing is cached client-side; both calls hit the backend.
    assert_eq!(recorder.requests().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: non-2xx statuses carry the status and the raw body text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_carries_status_and_raw_body() {
    let (base, _) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let err = client.get::<Value>("/volunteers/999").await.unwrap_err();
    assert_eq!(err, ApiError::http(404, "Not Found"));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn error_body_is_not_parsed() {
    let (base, _) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let err = client
        .post::<Value, _>("/validation", &json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 422);
    assert_eq!(
        err.detail(),
        r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#
    );
}

#[tokio::test]
async fn unknown_route_is_an_http_error() {
    let (base, _) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let err = client.get::<Value>("/nowhere").await.unwrap_err();
    assert_matches!(err, ApiError::Http { status_code: 404, .. });
}

// ---------------------------------------------------------------------------
// Test: 2xx bodies that do not decode fail loudly
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_success_body_is_a_decode_error() {
    let (base, _) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let err = client.get::<Value>("/empty").await.unwrap_err();
    assert_matches!(err, ApiError::Decode { status_code: 200, .. });

    client.send_unit(Request::get("/empty")).await.unwrap();
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let (base, _) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let err = client.get::<Value>("/html").await.unwrap_err();
    assert_matches!(err, ApiError::Decode { status_code: 200, .. });
}

// ---------------------------------------------------------------------------
// Test: bearer token handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_token_sends_no_authorization_header() {
    let (base, recorder) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let _: Value = client.get("/whoami").await.unwrap();
    assert_eq!(recorder.last().authorization, None);
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer_on_every_verb() {
    let (base, recorder) = common::spawn(echo_router()).await;
    let client = common::authed_client(&base, "tok-123");

    let _: Value = client.get("/items").await.unwrap();
    let _: Value = client.post("/items", &json!({"a": 1})).await.unwrap();
    let _: Value = client.put("/items", &json!({"a": 1})).await.unwrap();
    let _: Value = client.delete("/items/1").await.unwrap();

    let requests = recorder.requests();
    assert_eq!(requests.len(), 4);
    for request in requests {
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok-123"));
    }
}

#[tokio::test]
async fn skip_auth_requests_never_carry_the_token() {
    let (base, recorder) = common::spawn(echo_router()).await;
    let client = common::authed_client(&base, "tok-123");

    let _: Value = client
        .send(Request::get("/whoami").skip_auth())
        .await
        .unwrap();
    assert_eq!(recorder.last().authorization, None);
}

#[tokio::test]
async fn set_then_clear_token_takes_effect_immediately() {
    let (base, recorder) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    client.session().set_auth_token("t1", None).unwrap();
    let _: Value = client.get("/whoami").await.unwrap();
    assert_eq!(recorder.last().authorization.as_deref(), Some("Bearer t1"));

    client.session().set_auth_token("t2", None).unwrap();
    let _: Value = client.get("/whoami").await.unwrap();
    assert_eq!(recorder.last().authorization.as_deref(), Some("Bearer t2"));

    client.session().clear_auth_token().unwrap();
    let _: Value = client.get("/whoami").await.unwrap();
    assert_eq!(recorder.last().authorization, None);
}

#[tokio::test]
async fn clones_share_the_session() {
    let (base, recorder) = common::spawn(echo_router()).await;
    let client = common::client(&base);
    let other = client.clone();

    client.session().set_auth_token("shared", None).unwrap();
    let _: Value = other.get("/whoami").await.unwrap();
    assert_eq!(recorder.last().authorization.as_deref(), Some("Bearer shared"));
}

// ---------------------------------------------------------------------------
// Test: query strings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn none_query_values_are_omitted() {
    let (base, recorder) = common::spawn(echo_router()).await;
    let client = common::client(&base);

    let query = json!({"skip": 0, "limit": 20, "status": null, "search": "tree planting"});
    let _: Value = client.get_query("/items", &query).await.unwrap();

    let sent = recorder.last().query.unwrap();
    assert!(sent.contains("skip=0"));
    assert!(sent.contains("limit=20"));
    assert!(sent.contains("search=tree+planting") || sent.contains("search=tree%20planting"));
    assert!(!sent.contains("status"));
}

// ---------------------------------------------------------------------------
// Test: transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_backend_reports_status_zero() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = common::client(&format!("http://{addr}"));
    let err = client.get::<Value>("/items").await.unwrap_err();

    assert_matches!(err, ApiError::Transport { .. });
    assert_eq!(err.status_code(), 0);
    assert!(!err.detail().is_empty());
}
