use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use uuid::Uuid;

use tvlink_dashboard::domain::repository::{DeviceLinkPort, SessionCheckPort};
use tvlink_dashboard::infra::relay::{DEFAULT_TIMEOUT, RelayClient};
use tvlink_dashboard::usecase::activate::ActivateUseCase;
use tvlink_domain::activation::{ActivationMethod, ActivationOutcome};
use tvlink_domain::code::validate_code;
use tvlink_domain::cookie::CookieRecord;

use crate::helpers::{MockAttemptRepo, MockCookieSetRepo, test_cookie_set};

#[derive(Clone, Default)]
struct Backend {
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

async fn expired(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    *backend.last_body.lock().unwrap() = Some(body);
    Json(json!({
        "outcome": "rejected",
        "message": "Your cookies have expired. Please upload fresh cookies."
    }))
}

async fn forbidden() -> StatusCode {
    StatusCode::FORBIDDEN
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "outcome": "activated", "message": "too late" }))
}

async fn partial_check() -> Json<Value> {
    Json(json!({ "ok": true, "plan": "Premium" }))
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

/// Serve a stand-in activation backend on an ephemeral local port.
async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/expired/activate", post(expired))
        .route("/forbidden/activate", post(forbidden))
        .route("/forbidden/validate", post(forbidden))
        .route("/slow/activate", post(slow))
        .route("/partial/validate", post(partial_check))
        .route("/garbage/activate", post(garbage))
        .with_state(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn should_pass_remote_rejection_through_once() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let visitor = Uuid::new_v4();
    let attempts = MockAttemptRepo::empty();
    let log = attempts.attempts_handle();

    let uc = ActivateUseCase {
        cookie_sets: MockCookieSetRepo::new(vec![test_cookie_set(visitor, true)]),
        attempts,
        link: RelayClient::new(Some(&format!("{base}/expired")), DEFAULT_TIMEOUT).unwrap(),
    };

    let output = uc
        .execute(visitor, "12345678", ActivationMethod::Manual)
        .await
        .unwrap();

    assert_eq!(output.report.outcome, ActivationOutcome::Rejected);
    assert!(output.report.message.contains("expired"));
    assert_eq!(backend.hits.load(Ordering::SeqCst), 1);

    let body = backend.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["code"], "12345678");
    assert_eq!(body["cookies"][0]["name"], "NetflixId");

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert!(!log[0].success());
}

#[tokio::test]
async fn should_report_non_success_status_as_http_code() {
    let base = spawn_backend(Backend::default()).await;
    let client = RelayClient::new(Some(&format!("{base}/forbidden")), DEFAULT_TIMEOUT).unwrap();
    let code = validate_code("123456").unwrap();

    let report = client.activate(&[], &code).await;
    assert_eq!(report.outcome, ActivationOutcome::Rejected);
    assert_eq!(report.message, "HTTP 403");

    let check = client.check(&[]).await;
    assert!(!check.ok);
    assert_eq!(check.err.as_deref(), Some("HTTP 403"));
}

#[tokio::test]
async fn should_convert_timeout_into_rejection() {
    let base = spawn_backend(Backend::default()).await;
    let client = RelayClient::new(Some(&format!("{base}/slow")), Duration::from_millis(200)).unwrap();
    let code = validate_code("123456").unwrap();

    let report = client.activate(&[], &code).await;

    assert_eq!(report.outcome, ActivationOutcome::Rejected);
    assert!(report.message.starts_with("Timeout"), "got {:?}", report.message);
}

#[tokio::test]
async fn should_convert_malformed_reply_into_rejection() {
    let base = spawn_backend(Backend::default()).await;
    let client = RelayClient::new(Some(&format!("{base}/garbage")), DEFAULT_TIMEOUT).unwrap();
    let code = validate_code("123456").unwrap();

    let report = client.activate(&[], &code).await;
    assert_eq!(report.outcome, ActivationOutcome::Rejected);
    assert!(!report.message.is_empty());
}

#[tokio::test]
async fn should_fill_missing_account_fields() {
    let base = spawn_backend(Backend::default()).await;
    let client = RelayClient::new(Some(&format!("{base}/partial")), DEFAULT_TIMEOUT).unwrap();

    let check = client.check(&[CookieRecord::bare("NetflixId", "abc")]).await;

    assert!(check.ok);
    assert_eq!(check.plan.as_deref(), Some("Premium"));
    assert_eq!(check.country.as_deref(), Some("Unknown"));
    assert_eq!(check.member_since.as_deref(), Some("Unknown"));
}

#[tokio::test]
async fn should_report_refused_connection_as_rejection() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RelayClient::new(Some(&format!("http://{addr}")), DEFAULT_TIMEOUT).unwrap();
    let code = validate_code("123456").unwrap();
    let report = client.activate(&[], &code).await;
    assert_eq!(report.outcome, ActivationOutcome::Rejected);
}
