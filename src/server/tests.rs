#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use super::*;
use crate::error::{StoreError, StoreResult};
use crate::kv::{KvEntry, KvStore, MemoryKv};

const USER: &str = "demo-user-001";

/// A store whose every call fails.
struct BrokenKv;

impl KvStore for BrokenKv {
    fn get(&self, _key: &str) -> StoreResult<Option<Value>> {
        Err(StoreError::Poisoned)
    }
    fn set(&self, _key: &str, _value: &Value) -> StoreResult<()> {
        Err(StoreError::Poisoned)
    }
    fn del(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Poisoned)
    }
    fn get_by_prefix(&self, _prefix: &str) -> StoreResult<Vec<KvEntry>> {
        Err(StoreError::Poisoned)
    }
}

async fn spawn_with(store: Arc<dyn KvStore>, prefix: &str) -> String {
    let app = router(
        AppState {
            ledger: Ledger::new(store),
        },
        prefix,
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}{prefix}")
}

async fn spawn_app() -> String {
    spawn_with(Arc::new(MemoryKv::new()), "/api").await
}

async fn get_json(url: &str) -> (StatusCode, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

async fn post_json(url: &str, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

fn lunch() -> Value {
    json!({
        "amount": 250.75,
        "description": "Lunch",
        "category": "Food & Dining",
        "date": "2024-12-15"
    })
}

// ── Health ────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let base = spawn_app().await;
    let (status, body) = get_json(&format!("{base}/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

// ── Expenses ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_empty() {
    let base = spawn_app().await;
    let (status, body) = get_json(&format!("{base}/expenses/{USER}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "expenses": []}));
}

#[tokio::test]
async fn test_create_then_list() {
    let base = spawn_app().await;
    let (status, created) = post_json(&format!("{base}/expenses/{USER}"), lunch()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["success"], true);
    let id = created["id"].as_str().unwrap().to_string();

    let (_, body) = get_json(&format!("{base}/expenses/{USER}")).await;
    let expenses = body["expenses"].as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["id"], id.as_str());
    assert_eq!(expenses[0]["amount"], 250.75);
    assert_eq!(expenses[0]["category"], "Food & Dining");
    assert_eq!(expenses[0]["date"], "2024-12-15");
    assert_eq!(expenses[0]["userId"], USER);
    assert!(expenses[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_delete_then_list() {
    let base = spawn_app().await;
    let (_, first) = post_json(&format!("{base}/expenses/{USER}"), lunch()).await;
    let (_, second) = post_json(&format!("{base}/expenses/{USER}"), lunch()).await;
    let gone = first["id"].as_str().unwrap();

    let resp = reqwest::Client::new()
        .delete(format!("{base}/expenses/{USER}/{gone}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"success": true}));

    let (_, body) = get_json(&format!("{base}/expenses/{USER}")).await;
    let expenses = body["expenses"].as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["id"], second["id"]);
}

#[tokio::test]
async fn test_expenses_scoped_to_user() {
    let base = spawn_app().await;
    post_json(&format!("{base}/expenses/alice"), lunch()).await;
    let (_, body) = get_json(&format!("{base}/expenses/bob")).await;
    assert_eq!(body["expenses"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_enveloped_500() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/expenses/{USER}"))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": false, "error": "Failed to add expense"})
    );
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/salary/{USER}"))
        .body(r#"{"monthly": 42000}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ── Salary ────────────────────────────────────────────────────

#[tokio::test]
async fn test_salary_default() {
    let base = spawn_app().await;
    let (status, body) = get_json(&format!("{base}/salary/{USER}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["salary"]["monthly"], 50000.0);
    assert!(body["salary"]["lastUpdated"].is_null());
}

#[tokio::test]
async fn test_salary_overwrite() {
    let base = spawn_app().await;
    let url = format!("{base}/salary/{USER}");
    let (status, ack) = post_json(&url, json!({"monthly": 42000})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({"success": true}));

    post_json(&url, json!({"monthly": 65000.5})).await;
    let (_, body) = get_json(&url).await;
    assert_eq!(body["salary"]["monthly"], 65000.5);
    assert!(body["salary"]["lastUpdated"].is_string());
}

#[tokio::test]
async fn test_salary_missing_field_is_500() {
    let base = spawn_app().await;
    let (status, body) = post_json(&format!("{base}/salary/{USER}"), json!({})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to update salary");
}

// ── Savings ───────────────────────────────────────────────────

#[tokio::test]
async fn test_savings_default() {
    let base = spawn_app().await;
    let (_, body) = get_json(&format!("{base}/savings/{USER}")).await;
    assert_eq!(body["savings"]["goal"], 100000.0);
    assert_eq!(body["savings"]["current"], 0.0);
    assert!(body["savings"]["lastUpdated"].is_null());
}

#[tokio::test]
async fn test_savings_partial_update() {
    let base = spawn_app().await;
    let url = format!("{base}/savings/{USER}");
    post_json(&url, json!({"goal": 20000})).await;
    post_json(&url, json!({"current": 1500})).await;

    let (_, body) = get_json(&url).await;
    assert_eq!(body["savings"]["goal"], 20000.0);
    assert_eq!(body["savings"]["current"], 1500.0);
    assert!(body["savings"]["lastUpdated"].is_string());
}

// ── Failures and plumbing ─────────────────────────────────────

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let base = spawn_with(Arc::new(BrokenKv), "/api").await;

    let (status, body) = get_json(&format!("{base}/expenses/{USER}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "error": "Failed to fetch expenses"})
    );

    let (_, body) = get_json(&format!("{base}/savings/{USER}")).await;
    assert_eq!(body["error"], "Failed to fetch savings");
}

#[tokio::test]
async fn test_unknown_route_is_enveloped_404() {
    let base = spawn_app().await;
    let (status, body) = get_json(&format!("{base}/budgets/{USER}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Not found"}));
}

#[tokio::test]
async fn test_routes_live_under_prefix_only() {
    let base = spawn_app().await;
    let root = base.trim_end_matches("/api");
    let (status, _) = get_json(&format!("{root}/health")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_without_prefix() {
    let base = spawn_with(Arc::new(MemoryKv::new()), "").await;
    let (status, body) = get_json(&format!("{base}/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .get(format!("{base}/health"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
