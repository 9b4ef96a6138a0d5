#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use alertkeeper::application::services::alert::AlertService;
use alertkeeper::domain::ports::store::UserStore;
use alertkeeper::infrastructure::persistence::sqlite_store::SqliteStore;
use alertkeeper::infrastructure::sync::http::HttpSynchronizer;
use alertkeeper::presentation::http::principal::TrustedHeaderResolver;
use alertkeeper::presentation::http::{router, AppState};

const HEADER: &str = "x-remote-user";

fn app(backend: &MockServer) -> Router {
    let store = Arc::new(SqliteStore::open_in_memory().expect("store"));
    for name in ["alice", "bob", "root"] {
        store.save_user(name).expect("save user");
    }
    let sync = HttpSynchronizer::new(&backend.uri(), Duration::from_secs(2)).expect("sync");
    let service = Arc::new(AlertService::new(
        store.clone(),
        store,
        Arc::new(sync),
        Some("root".to_string()),
    ));
    let resolver = TrustedHeaderResolver::new(HEADER).expect("header");
    router(AppState::new(service, Arc::new(resolver)))
}

fn request(verb: Method, uri: &str, user: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(verb).uri(uri);
    if let Some(user) = user {
        builder = builder.header(HEADER, user);
    }
    match form {
        Some(form) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("response")
}

async fn body_text(resp: Response) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8")
}

async fn body_json_value(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(resp).await).expect("json body")
}

#[tokio::test]
async fn end_to_end_over_http() {
    let backend = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/alerts/1"))
        .and(body_json(serde_json::json!({
            "id": 1,
            "name": "cpu-high",
            "enabled": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend)
        .await;
    let app = app(&backend);

    let resp = send(
        &app,
        request(Method::POST, "/alerts", Some("alice"), Some("name=cpu-high&enabled=false")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).expect("location"),
        "/alerts/1"
    );

    let resp = send(
        &app,
        request(Method::PATCH, "/alerts/1", Some("alice"), Some("enabled=true")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(body_text(resp).await, "Save alert successfully");

    let resp = send(&app, request(Method::GET, "/alerts/1", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail = body_json_value(resp).await;
    assert_eq!(detail["enabled"], true);
    assert_eq!(detail["admins"][0]["name"], "alice");

    let resp = send(
        &app,
        request(Method::PATCH, "/alerts/1?enabled=false", Some("bob"), None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(&app, request(Method::DELETE, "/alerts/1", Some("alice"), None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, request(Method::GET, "/alerts/1", None, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, request(Method::DELETE, "/alerts/1", Some("alice"), None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn backend_rejection_keeps_saved_state() {
    let backend = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&backend)
        .await;
    let app = app(&backend);

    send(
        &app,
        request(Method::POST, "/alerts?name=disk-full", Some("alice"), None),
    )
    .await;

    let resp = send(
        &app,
        request(Method::PUT, "/alerts/1", Some("alice"), Some("enabled=1")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(resp)
        .await
        .starts_with("Synchronize alert to monitoring backend error"));

    let resp = send(&app, request(Method::GET, "/alerts/1", None, None)).await;
    assert_eq!(body_json_value(resp).await["enabled"], true);
}

#[tokio::test]
async fn duplicate_name_is_conflict() {
    let backend = MockServer::start().await;
    let app = app(&backend);

    let first = send(
        &app,
        request(Method::POST, "/alerts", Some("alice"), Some("name=cpu-high")),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(
        &app,
        request(Method::POST, "/alerts", Some("bob"), Some("name=cpu-high")),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_text(second).await, "The alert's name is duplicated");
}

#[tokio::test]
async fn list_is_scoped_to_principal() {
    let backend = MockServer::start().await;
    let app = app(&backend);
    for (user, name) in [("alice", "a1"), ("bob", "b1"), ("alice", "a2")] {
        let resp = send(
            &app,
            request(Method::POST, "/alerts", Some(user), Some(&format!("name={name}"))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(&app, request(Method::GET, "/alerts", Some("root"), None)).await;
    assert_eq!(body_json_value(resp).await.as_array().expect("array").len(), 3);

    let resp = send(&app, request(Method::GET, "/alerts", Some("alice"), None)).await;
    let names: Vec<String> = body_json_value(resp)
        .await
        .as_array()
        .expect("array")
        .iter()
        .map(|a| a["name"].as_str().expect("name").to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"a1".to_string()));
    assert!(names.contains(&"a2".to_string()));
}

#[tokio::test]
async fn update_of_missing_alert_is_not_found() {
    let backend = MockServer::start().await;
    let app = app(&backend);
    let resp = send(
        &app,
        request(Method::PATCH, "/alerts/42", Some("root"), Some("enabled=true")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
