use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub use axum::http::StatusCode;

/// GET routes (relative to `/api`) and the table each one reads.
pub const DATASETS: &[(&str, &str)] = &[
    ("/rtpi/events", "rtpi_events"),
    ("/west-lindsey/consultations", "west_lindsey_consultations"),
    ("/peeringdb/ix/gb", "peeringdb_ix_gb"),
    ("/peeringdb/fac/gb", "peeringdb_fac_gb"),
    ("/planit/datacentres", "planit_datacentres"),
    ("/planit/renewables", "planit_renewables"),
    ("/planit/renewables-test2", "planit_renewables"),
];

/// Refresh keys (`POST /api/refresh/{key}`) and the table each rebuilds.
pub const REFRESHES: &[(&str, &str)] = &[
    ("rtpi", "rtpi_events"),
    ("west-lindsey", "west_lindsey_consultations"),
    ("peeringdb-ix", "peeringdb_ix_gb"),
    ("peeringdb-fac", "peeringdb_fac_gb"),
    ("planit-dc", "planit_datacentres"),
    ("planit-renew", "planit_renewables"),
    ("planit-test2", "planit_renewables"),
];

pub const APPLICATION_TABLE: &str = "west_lindsey_planning";

/// In-memory stand-in for the backend's tables and scraper runners.
#[derive(Debug, Default)]
pub struct Store {
    tables: HashMap<String, Vec<Value>>,
    failures: HashMap<String, StatusCode>,
    running: HashSet<String>,
    refreshes: HashMap<String, u32>,
}

impl Store {
    /// One representative row per table.
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store.insert(
            "rtpi_events",
            json!({"id": "https://www.rtpi.org.uk/events/1", "title": "Planning Summit",
                   "date": "2025-03-12", "region": "London", "category": "Conference",
                   "price": "£120", "url": "https://www.rtpi.org.uk/events/1"}),
        );
        store.insert(
            APPLICATION_TABLE,
            json!({"id": "140000", "reference": "140000", "location": "Land off Main Road, Gainsborough",
                   "ward": "Gainsborough North", "parish": "Gainsborough", "decision": "Pending",
                   "receivedDate": "2019-10-01", "uprn": "100030000000"}),
        );
        store.insert(
            "west_lindsey_consultations",
            json!({"id": "9001", "applicationId": "140000", "opinion": "No objection",
                   "consulteeName": "Highways", "createdTime": "2019-11-02T09:00:00"}),
        );
        store.insert(
            "peeringdb_ix_gb",
            json!({"id": "18", "name": "LINX LON1", "country": "GB", "city": "London", "networks": "900"}),
        );
        store.insert(
            "peeringdb_fac_gb",
            json!({"id": "34", "name": "Telehouse North", "address": "Coriander Avenue",
                   "city": "London", "country": "GB", "postal_code": "E14 2AA"}),
        );
        store.insert(
            "planit_datacentres",
            json!({"id": "Slough/P/12345", "authority": "Slough", "title": "Data centre campus",
                   "app_state": "Undecided", "postcode": "SL1 4AX", "lat": "51.52", "lng": "-0.61"}),
        );
        store.insert(
            "planit_renewables",
            json!({"id": "Lincoln/24/0001", "authority": "Lincoln", "title": "Solar farm",
                   "app_state": "Permitted", "postcode": "LN1 1AA"}),
        );
        store
    }

    pub fn insert(&mut self, table: &str, row: Value) {
        self.tables.entry(table.to_string()).or_default().push(row);
    }

    pub fn rows(&self, table: &str) -> &[Value] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Make the route at `path` (relative to `/api`) answer with `status`.
    pub fn fail(&mut self, path: &str, status: StatusCode) {
        self.failures.insert(path.to_string(), status);
    }

    /// Pretend the runner for `key` is busy so its refresh returns 409.
    pub fn mark_running(&mut self, key: &str) {
        self.running.insert(key.to_string());
    }

    /// Completed refreshes for `key`.
    pub fn refresh_count(&self, key: &str) -> u32 {
        self.refreshes.get(key).copied().unwrap_or(0)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Serialize)]
struct RefreshReply {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_s: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log: Option<String>,
}

pub fn app() -> Router {
    app_with(Arc::new(RwLock::new(Store::seeded())))
}

pub fn app_with(db: Db) -> Router {
    let mut api = Router::new()
        .route("/health", get(health))
        .route("/west-lindsey/application", get(application));
    for &(path, table) in DATASETS {
        api = api.route(path, dataset(path, table));
    }
    for &(key, table) in REFRESHES {
        api = api.route(&format!("/refresh/{key}"), refresh(key, table));
    }
    Router::new().nest("/api", api).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Arc::new(RwLock::new(Store::seeded()))).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

fn injected(store: &Store, path: &str) -> Option<Response> {
    store.failures.get(path).map(|&status| {
        warn!(path, %status, "answering with injected failure");
        (status, Json(json!({"error": "injected failure"}))).into_response()
    })
}

async fn health(State(db): State<Db>) -> Response {
    let store = db.read().await;
    if let Some(response) = injected(&store, "/health") {
        return response;
    }
    Json(json!({"status": "ok"})).into_response()
}

async fn application(State(db): State<Db>) -> Response {
    let store = db.read().await;
    if let Some(response) = injected(&store, "/west-lindsey/application") {
        return response;
    }
    let newest = store.rows(APPLICATION_TABLE).last().cloned();
    Json(newest.unwrap_or_else(|| json!({}))).into_response()
}

fn dataset(path: &'static str, table: &'static str) -> MethodRouter<Db> {
    get(move |State(db): State<Db>| async move {
        let store = db.read().await;
        if let Some(response) = injected(&store, path) {
            return response;
        }
        Json(store.rows(table).to_vec()).into_response()
    })
}

fn refresh(key: &'static str, table: &'static str) -> MethodRouter<Db> {
    post(move |State(db): State<Db>| async move {
        let mut store = db.write().await;
        if store.running.contains(key) {
            let reply = RefreshReply {
                ok: false,
                table: None,
                updated: None,
                elapsed_s: None,
                error: Some("already_running"),
                log: None,
            };
            return (StatusCode::CONFLICT, Json(reply)).into_response();
        }
        if let Some(&status) = store.failures.get(&format!("/refresh/{key}")) {
            warn!(key, %status, "refresh runner failing on request");
            let reply = RefreshReply {
                ok: false,
                table: None,
                updated: None,
                elapsed_s: Some("0.00"),
                error: Some("runner_failed"),
                log: Some(format!("{key} runner exited with an error")),
            };
            return (status, Json(reply)).into_response();
        }

        *store.refreshes.entry(key.to_string()).or_default() += 1;
        let updated = store.rows(table).len();
        info!(key, table, updated, "refresh completed");
        let reply = RefreshReply {
            ok: true,
            table: Some(table),
            updated: Some(updated),
            elapsed_s: Some("0.00"),
            error: None,
            log: None,
        };
        Json(reply).into_response()
    })
}
