//! Domain tables: path and query marshaling, public endpoints, and the
//! upload/export paths.

mod common;

use std::collections::HashMap;

use assert_matches::assert_matches;
use axum::extract::{Multipart, Path, Query};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use portal_api::{FileUpload, PortalApi};
use portal_core::ApiError;
use portal_models::contact::ContactForm;
use portal_models::newsletter::NewsletterSubscribe;
use portal_models::report::{ExportFormat, ExportKind, ExportQuery};
use portal_models::search::{SearchQuery, SearchType};
use portal_models::user::UserRole;
use portal_models::volunteer::TimeLogStatus;

fn portal_router() -> Router {
    async fn volunteer(Path(id): Path<i64>) -> impl IntoResponse {
        if id == 999 {
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        } else {
            Json(common::volunteer_json(id)).into_response()
        }
    }

    // Rejects any body other than exactly `{"approved": <bool>}`.
    async fn review(Path(log_id): Path<i64>, Json(body): Json<Value>) -> impl IntoResponse {
        let fields = body.as_object().map(|o| o.len()).unwrap_or_default();
        match body["approved"].as_bool() {
            Some(approved) if fields == 1 => {
                let status = if approved { "approved" } else { "rejected" };
                Json(common::time_log_json(log_id, status)).into_response()
            }
            _ => (StatusCode::BAD_REQUEST, "unexpected review body").into_response(),
        }
    }

    async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({
            "projects": [],
            "tasks": [],
            "volunteers": [common::volunteer_json(3)],
            "posts": [],
            "total": 1,
            "echo": params
        }))
    }

    async fn upload(mut multipart: Multipart) -> Json<Value> {
        let mut filename = None;
        let mut content_type = None;
        let mut size = 0;
        let mut folder = String::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            match field.name().map(str::to_string).as_deref() {
                Some("file") => {
                    filename = field.file_name().map(str::to_string);
                    content_type = field.content_type().map(str::to_string);
                    size = field.bytes().await.unwrap().len();
                }
                Some("folder") => folder = field.text().await.unwrap(),
                _ => {}
            }
        }
        let name = filename.unwrap_or_default();
        Json(json!({
            "filename": name,
            "url": format!("/uploads/{folder}/{name}"),
            "size": size,
            "content_type": content_type
        }))
    }

    async fn export(
        Path(kind): Path<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        match params.get("format").map(String::as_str) {
            Some("csv") => (
                [
                    (CONTENT_TYPE, "text/csv".to_string()),
                    (
                        CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{kind}_2024.csv\""),
                    ),
                ],
                "id,full_name\n3,Grace Hopper\n",
            )
                .into_response(),
            Some("json") => Json(json!([{"id": 3}])).into_response(),
            _ => (StatusCode::BAD_REQUEST, "unknown format").into_response(),
        }
    }

    Router::new()
        .route("/volunteers/{id}", get(volunteer))
        .route("/volunteers/hours/{log_id}/review", post(review))
        .route("/search/", get(search))
        .route("/files/upload", post(upload))
        .route("/reports/export/{kind}", get(export))
        .route(
            "/users/{id}/role",
            put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                let mut user = common::user_json(id);
                user["role"] = body["role"].clone();
                Json(user)
            }),
        )
        .route(
            "/contact/",
            post(|| async { Json(json!({"message": "Thanks, we'll be in touch"})) }),
        )
        .route(
            "/newsletter/subscribe",
            post(|| async { Json(json!({"message": "Subscribed"})) }),
        )
        .route(
            "/notifications/read-all",
            put(|| async { Json(json!({"message": "All notifications marked as read"})) }),
        )
}

fn failing_router(status: StatusCode, body: &'static str) -> Router {
    Router::new()
        .route("/files/upload", post(move || async move { (status, body) }))
        .route("/reports/export/{kind}", get(move || async move { (status, body) }))
}

// ---------------------------------------------------------------------------
// Test: volunteers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_volunteer_is_404_with_raw_detail() {
    let (base, _) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let err = api.volunteers().get_volunteer(999).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.detail(), "Not Found");
    assert_eq!(err, ApiError::http(404, "Not Found"));
}

#[tokio::test]
async fn volunteer_is_decoded() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let volunteer = api.volunteers().get_volunteer(3).await.unwrap();
    assert_eq!(volunteer.full_name, "Grace Hopper");
    assert_eq!(volunteer.skills, vec!["first aid", "driving"]);
    assert_eq!(recorder.last().path, "/volunteers/3");
}

#[tokio::test]
async fn hour_review_sends_only_the_decision() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let approved = api.volunteers().approve_hours(11).await.unwrap();
    assert_eq!(approved.status, TimeLogStatus::Approved);

    let rejected = api.volunteers().reject_hours(12).await.unwrap();
    assert_eq!(rejected.status, TimeLogStatus::Rejected);

    let last = recorder.last();
    assert_eq!(last.method, "POST");
    assert_eq!(last.path, "/volunteers/hours/12/review");
}

// ---------------------------------------------------------------------------
// Test: query and path marshaling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_sends_query_types_and_limit() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let query = SearchQuery::new("river")
        .with_types(&[SearchType::Projects, SearchType::Volunteers])
        .with_limit(5);
    let results = api.search().search(&query).await.unwrap();

    assert_eq!(results.total, 1);
    assert_eq!(results.volunteers.len(), 1);

    let sent = recorder.last().query.unwrap();
    assert!(sent.contains("q=river"));
    assert!(sent.contains("types=projects%2Cvolunteers"));
    assert!(sent.contains("limit=5"));
}

#[tokio::test]
async fn blank_search_is_rejected_locally() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let err = api.search().search(&SearchQuery::new("  ")).await.unwrap_err();
    assert_matches!(err, ApiError::Validation { .. });
    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn blog_slug_is_percent_encoded() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    // No blog routes are mounted; only the request path matters here.
    let err = api.blog().get_post("spring news/2024").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(recorder.last().path, "/blog/posts/spring%20news%2F2024");
}

#[tokio::test]
async fn set_role_puts_the_new_role() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let user = api.users().set_role(4, UserRole::Coordinator).await.unwrap();
    assert_eq!(user.role, UserRole::Coordinator);
    assert_eq!(recorder.last().method, "PUT");
    assert_eq!(recorder.last().path, "/users/4/role");
}

#[tokio::test]
async fn mark_all_read_is_a_bodiless_put() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = PortalApi::new(common::authed_client(&base, "AT1"));

    let response = api.notifications().mark_all_read().await.unwrap();
    assert_eq!(response.message, "All notifications marked as read");
    assert_eq!(recorder.last().method, "PUT");
    assert_eq!(recorder.last().content_type, None);
}

// ---------------------------------------------------------------------------
// Test: public endpoints never carry the token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contact_and_newsletter_skip_auth() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = PortalApi::new(common::authed_client(&base, "AT1"));

    api.contact()
        .submit(&ContactForm {
            name: "Grace".into(),
            email: "grace@example.org".into(),
            subject: "Volunteering".into(),
            message: "Can I help on Saturdays?".into(),
        })
        .await
        .unwrap();
    api.newsletter()
        .subscribe(&NewsletterSubscribe {
            email: "grace@example.org".into(),
            name: None,
        })
        .await
        .unwrap();

    for path in ["/contact/", "/newsletter/subscribe"] {
        let sent = recorder.find(path).unwrap();
        assert_eq!(sent.authorization, None, "{path} carried a token");
    }
}

#[tokio::test]
async fn invalid_contact_form_never_reaches_the_backend() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let err = api
        .contact()
        .submit(&ContactForm {
            name: "Grace".into(),
            email: "not an email".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::Validation { .. });
    assert!(recorder.requests().is_empty());
}

// ---------------------------------------------------------------------------
// Test: upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_sends_multipart_with_bearer() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = PortalApi::new(common::authed_client(&base, "AT1"));

    let file = FileUpload::new("flyer.pdf", b"%PDF-1.7 ...".to_vec())
        .content_type("application/pdf")
        .folder("events");
    let uploaded = api.files().upload(file).await.unwrap();

    assert_eq!(uploaded.filename, "flyer.pdf");
    assert_eq!(uploaded.url, "/uploads/events/flyer.pdf");
    assert_eq!(uploaded.size, 12);
    assert_eq!(uploaded.content_type.as_deref(), Some("application/pdf"));

    let sent = recorder.last();
    assert_eq!(sent.authorization.as_deref(), Some("Bearer AT1"));
    assert!(sent
        .content_type
        .unwrap()
        .starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn upload_failure_has_the_common_error_shape() {
    let (base, _) =
        common::spawn(failing_router(StatusCode::PAYLOAD_TOO_LARGE, "File too large")).await;
    let api = common::api(&base);

    let err = api
        .files()
        .upload(FileUpload::new("huge.bin", vec![0; 16]))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::http(413, "File too large"));
}

// ---------------------------------------------------------------------------
// Test: export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csv_export_returns_raw_bytes_and_filename() {
    let (base, recorder) = common::spawn(portal_router()).await;
    let api = PortalApi::new(common::authed_client(&base, "AT1"));

    let download = api
        .reports()
        .export(ExportKind::Volunteers, &ExportQuery::default())
        .await
        .unwrap();

    assert_eq!(download.bytes, b"id,full_name\n3,Grace Hopper\n");
    assert_eq!(download.content_type.as_deref(), Some("text/csv"));
    assert_eq!(download.filename.as_deref(), Some("volunteers_2024.csv"));

    let sent = recorder.last();
    assert_eq!(sent.path, "/reports/export/volunteers");
    assert_eq!(sent.query.as_deref(), Some("format=csv"));
    assert_eq!(sent.authorization.as_deref(), Some("Bearer AT1"));
}

#[tokio::test]
async fn json_export_without_disposition_gets_a_derived_name() {
    let (base, _) = common::spawn(portal_router()).await;
    let api = common::api(&base);

    let query = ExportQuery {
        format: ExportFormat::Json,
        ..Default::default()
    };
    let download = api.reports().export(ExportKind::Projects, &query).await.unwrap();

    assert_eq!(download.filename.as_deref(), Some("projects.json"));
    let rows: Value = serde_json::from_slice(&download.bytes).unwrap();
    assert_eq!(rows, json!([{"id": 3}]));
}

#[tokio::test]
async fn export_filename_never_leaves_the_working_directory() {
    fn disposition_router(value: &'static str) -> Router {
        Router::new().route(
            "/reports/export/{kind}",
            get(move || async move { ([(CONTENT_DISPOSITION, value)], "id\n") }),
        )
    }

    let (base, _) = common::spawn(disposition_router("attachment; filename=\"../../.bashrc\"")).await;
    let download = common::api(&base)
        .reports()
        .export(ExportKind::Volunteers, &ExportQuery::default())
        .await
        .unwrap();
    assert_eq!(download.filename.as_deref(), Some(".bashrc"));

    let (base, _) = common::spawn(disposition_router("attachment; filename=\"..\"")).await;
    let download = common::api(&base)
        .reports()
        .export(ExportKind::Hours, &ExportQuery::default())
        .await
        .unwrap();
    assert_eq!(download.filename.as_deref(), Some("hours.csv"));
}

#[tokio::test]
async fn export_failure_has_the_common_error_shape() {
    let (base, _) = common::spawn(failing_router(StatusCode::FORBIDDEN, "Forbidden")).await;
    let api = common::api(&base);

    let err = api
        .reports()
        .export(ExportKind::Hours, &ExportQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::http(403, "Forbidden"));
}
