use std::sync::Arc;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Db, Store, APPLICATION_TABLE, DATASETS, REFRESHES};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn post(uri: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn db(store: Store) -> Db {
    Arc::new(RwLock::new(store))
}

// --- reads ---

#[tokio::test]
async fn health_is_ok() {
    let resp = app().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn every_dataset_route_returns_an_array() {
    for &(path, _) in DATASETS {
        let resp = app().oneshot(get(&format!("/api{path}"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let body = body_json(resp).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1), "{path}");
    }
}

#[tokio::test]
async fn renewables_test2_reads_the_renewables_table() {
    let a = body_json(app().oneshot(get("/api/planit/renewables")).await.unwrap()).await;
    let b = body_json(app().oneshot(get("/api/planit/renewables-test2")).await.unwrap()).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn application_returns_newest_row() {
    let mut store = Store::default();
    store.insert(APPLICATION_TABLE, json!({"id": "1"}));
    store.insert(APPLICATION_TABLE, json!({"id": "2"}));
    let resp = app_with(db(store))
        .oneshot(get("/api/west-lindsey/application"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, json!({"id": "2"}));
}

#[tokio::test]
async fn application_without_rows_is_empty_object() {
    let resp = app_with(db(Store::default()))
        .oneshot(get("/api/west-lindsey/application"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({}));
}

#[tokio::test]
async fn injected_failure_on_read() {
    let mut store = Store::seeded();
    store.fail("/peeringdb/ix/gb", StatusCode::INTERNAL_SERVER_ERROR);
    let resp = app_with(db(store)).oneshot(get("/api/peeringdb/ix/gb")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(get("/api/planit/nowhere")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn refresh_route_rejects_get() {
    let resp = app().oneshot(get("/api/refresh/rtpi")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- refresh ---

#[tokio::test]
async fn every_refresh_route_reports_its_table() {
    for &(key, table) in REFRESHES {
        let resp = app().oneshot(post(&format!("/api/refresh/{key}"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{key}");
        let body = body_json(resp).await;
        assert_eq!(body["ok"], true, "{key}");
        assert_eq!(body["table"], table, "{key}");
        assert_eq!(body["updated"], 1, "{key}");
    }
}

#[tokio::test]
async fn refresh_counts_are_recorded() {
    let shared = db(Store::seeded());
    let app = app_with(shared.clone());
    app.clone().oneshot(post("/api/refresh/planit-dc")).await.unwrap();
    app.oneshot(post("/api/refresh/planit-dc")).await.unwrap();
    let store = shared.read().await;
    assert_eq!(store.refresh_count("planit-dc"), 2);
    assert_eq!(store.refresh_count("rtpi"), 0);
}

#[tokio::test]
async fn running_refresh_conflicts() {
    let mut store = Store::seeded();
    store.mark_running("west-lindsey");
    let resp = app_with(db(store))
        .oneshot(post("/api/refresh/west-lindsey"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(resp).await,
        json!({"ok": false, "error": "already_running"})
    );
}

#[tokio::test]
async fn failing_runner_reports_log() {
    let mut store = Store::seeded();
    store.fail("/refresh/rtpi", StatusCode::INTERNAL_SERVER_ERROR);
    let resp = app_with(db(store)).oneshot(post("/api/refresh/rtpi")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "runner_failed");
    assert!(body["log"].as_str().unwrap().contains("rtpi"));
}
