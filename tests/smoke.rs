//! End-to-end tests for the smoke-test harness
//!
//! Each test spins up an in-process mock of the gig-order backend on an
//! ephemeral port and drives a full harness run against it. The mock records
//! every request path so the tests can assert exactly which calls were made.

use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use gigorder_smoke::{Credentials, Harness};

/// Shared log of "METHOD /path" lines, one per request the mock served
#[derive(Clone, Default)]
struct Hits(Arc<Mutex<Vec<String>>>);

impl Hits {
    fn contains(&self, line: &str) -> bool {
        self.0.lock().unwrap().iter().any(|hit| hit == line)
    }

    fn count_matching(&self, prefix: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|hit| hit.starts_with(prefix))
            .count()
    }
}

async fn track(State(hits): State<Hits>, request: Request, next: Next) -> Response {
    hits.0
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));
    next.run(request).await
}

fn wrap(data: Value) -> Json<Value> {
    Json(json!({"code": 200, "message": "success", "data": data}))
}

async fn ok_obj() -> Json<Value> {
    wrap(json!({}))
}

async fn ok_list() -> Json<Value> {
    wrap(json!([]))
}

async fn login_ok() -> Json<Value> {
    wrap(json!({"token": "test-token"}))
}

async fn login_denied() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"code": 401, "message": "bad credentials"})),
    )
}

async fn login_without_token() -> Json<Value> {
    wrap(json!({}))
}

async fn create_member() -> Json<Value> {
    wrap(json!({"member_id": 42}))
}

async fn create_member_rejected() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"code": 400, "message": "invalid member"})),
    )
}

async fn create_customer() -> Json<Value> {
    wrap(json!({"customer_id": 7}))
}

async fn create_category() -> Json<Value> {
    wrap(json!({"category_id": 3}))
}

async fn create_order() -> Json<Value> {
    wrap(json!({"order_id": 99}))
}

async fn list_configs() -> Json<Value> {
    wrap(json!([{"config_key": "commission_rate", "config_value": "0.15"}]))
}

/// Every route except login and member creation, which vary per test
fn base_router() -> Router {
    Router::new()
        .route("/api/swagger/index.html", get(|| async { "swagger" }))
        .route("/api/v1/members", get(ok_list))
        .route(
            "/api/v1/members/{id}",
            get(ok_obj).put(ok_obj).delete(ok_obj),
        )
        .route("/api/v1/customers", get(ok_list).post(create_customer))
        .route(
            "/api/v1/customers/{id}",
            get(ok_obj).put(ok_obj).delete(ok_obj),
        )
        .route("/api/v1/customers/{id}/recharge", post(ok_obj))
        .route("/api/v1/customers/{id}/recharge-history", get(ok_list))
        .route(
            "/api/v1/order-categories",
            get(ok_list).post(create_category),
        )
        .route(
            "/api/v1/order-categories/{id}",
            put(ok_obj).delete(ok_obj),
        )
        .route("/api/v1/orders", get(ok_list).post(create_order))
        .route("/api/v1/orders/{id}", get(ok_obj).put(ok_obj))
        .route("/api/v1/orders/{id}/status", put(ok_obj))
        .route("/api/v1/configs", get(list_configs))
        .route("/api/v1/configs/{key}", put(ok_obj))
        .route("/api/v1/logs", get(ok_list))
}

/// Serve the router on an ephemeral port; returns the harness base URL
async fn spawn_backend(router: Router, hits: Hits) -> String {
    let app = router.layer(middleware::from_fn_with_state(hits, track));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/v1")
}

fn credentials() -> Credentials {
    Credentials {
        account: "admin".to_string(),
        password: "123456".to_string(),
    }
}

#[tokio::test]
async fn full_run_against_healthy_backend_is_green() {
    let hits = Hits::default();
    let router = base_router()
        .route("/api/v1/login", post(login_ok))
        .route("/api/v1/members", post(create_member));
    let base_url = spawn_backend(router, hits.clone()).await;

    let report_dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::new(&base_url, credentials()).unwrap();

    harness.preflight().await.unwrap();
    let outcome = harness.run(report_dir.path()).await.unwrap();

    assert!(outcome.is_green());
    assert!(outcome.authenticated);
    assert_eq!(outcome.failed_calls, 0);
    // login 1 + members 6 + customers 7 + categories 4 + orders 8
    // + configs 3 + logs 4
    assert_eq!(outcome.total_calls, 33);
    assert_eq!(harness.records().len(), outcome.total_calls);
    assert_eq!(harness.phase(), gigorder_smoke::runner::Phase::Done);

    // Created ids flow into the dependent calls.
    assert!(hits.contains("GET /api/v1/members/42"));
    assert!(hits.contains("DELETE /api/v1/members/42"));
    assert!(hits.contains("POST /api/v1/customers/7/recharge"));
    assert!(hits.contains("PUT /api/v1/orders/99/status"));
    assert!(hits.contains("PUT /api/v1/configs/commission_rate"));

    // The report lands on disk and carries the summary.
    let report: Value = serde_json::from_str(
        &std::fs::read_to_string(&outcome.report_path).unwrap(),
    )
    .unwrap();
    assert_eq!(report["test_summary"]["total_tests"], 33);
    assert_eq!(report["test_summary"]["failed_tests"], 0);
    assert_eq!(report["test_summary"]["success_rate"], "100.00%");
    assert_eq!(report["test_results"]["members"][0]["method"], "GET");
}

#[tokio::test]
async fn rejected_login_skips_all_scenarios() {
    let hits = Hits::default();
    let router = base_router()
        .route("/api/v1/login", post(login_denied))
        .route("/api/v1/members", post(create_member));
    let base_url = spawn_backend(router, hits.clone()).await;

    let report_dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::new(&base_url, credentials()).unwrap();
    let outcome = harness.run(report_dir.path()).await.unwrap();

    assert!(!outcome.authenticated);
    assert!(!outcome.is_green());
    assert_eq!(outcome.total_calls, 1);
    assert_eq!(hits.count_matching("GET /api/v1/members"), 0);
}

#[tokio::test]
async fn login_without_token_counts_as_failed_auth() {
    let hits = Hits::default();
    let router = base_router()
        .route("/api/v1/login", post(login_without_token))
        .route("/api/v1/members", post(create_member));
    let base_url = spawn_backend(router, hits.clone()).await;

    let report_dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::new(&base_url, credentials()).unwrap();
    let outcome = harness.run(report_dir.path()).await.unwrap();

    assert!(!outcome.authenticated);
    assert_eq!(outcome.total_calls, 1);
}

#[tokio::test]
async fn failed_member_creation_skips_dependent_calls() {
    let hits = Hits::default();
    let router = base_router()
        .route("/api/v1/login", post(login_ok))
        .route("/api/v1/members", post(create_member_rejected));
    let base_url = spawn_backend(router, hits.clone()).await;

    let report_dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::new(&base_url, credentials()).unwrap();
    let outcome = harness.run(report_dir.path()).await.unwrap();

    assert!(!outcome.is_green());
    assert_eq!(outcome.failed_calls, 1);
    // The member detail/update/delete steps are skipped, everything else runs.
    assert_eq!(outcome.total_calls, 30);
    assert_eq!(hits.count_matching("GET /api/v1/members/"), 0);
    // Later scenarios still ran.
    assert!(hits.contains("GET /api/v1/orders/99"));
}

#[tokio::test]
async fn creation_without_id_is_lenient() {
    // A 2xx creation response missing the id field skips dependents but is
    // not itself a failure.
    let hits = Hits::default();
    let router = base_router()
        .route("/api/v1/login", post(login_ok))
        .route("/api/v1/members", post(ok_obj));
    let base_url = spawn_backend(router, hits.clone()).await;

    let report_dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::new(&base_url, credentials()).unwrap();
    let outcome = harness.run(report_dir.path()).await.unwrap();

    assert!(outcome.is_green());
    assert_eq!(outcome.total_calls, 30);
    assert_eq!(hits.count_matching("GET /api/v1/members/"), 0);
}
