//! Response shapes for the dashboard API.
//!
//! # Design
//! The backend serves rows straight out of its store, so a row may carry
//! storage columns (`created_at`, `last_scraped`, ...) next to the scraped
//! fields. Each shape names the fields the dashboard relies on and keeps the
//! rest in a flattened `extra` map instead of rejecting the row. Use these
//! with `Dashboard::call_as` / `DashboardClient::parse_as`; the named methods
//! return the JSON verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Row identifier. Scrapers write strings, the database hands back integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtpiEvent {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The tracked West Lindsey planning application. The backend answers `{}`
/// when nothing has been scraped yet, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningApplication {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub parish: Option<String>,
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub received_date: Option<String>,
    #[serde(default)]
    pub valid_date: Option<String>,
    #[serde(default)]
    pub decision_date: Option<String>,
    #[serde(default)]
    pub committee_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlanningApplication {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.reference.is_none() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: RecordId,
    #[serde(default)]
    pub application_id: Option<RecordId>,
    #[serde(default)]
    pub opinion: Option<String>,
    #[serde(default)]
    pub consultee_name: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_modified_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// PeeringDB internet exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternetExchange {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Member network count, as written by the scraper.
    #[serde(default)]
    pub networks: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// PeeringDB colocation facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A PlanIt planning application (data centre or renewable energy search).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanitApplication {
    pub id: RecordId,
    #[serde(default)]
    pub authority: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub app_state: Option<String>,
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lng: Option<Value>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of every refresh trigger, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshOutcome {
    pub ok: bool,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub updated: Option<u64>,
    /// Runner wall time in seconds, formatted by the backend.
    #[serde(default)]
    pub elapsed_s: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Tail of the runner output, present when the run failed.
    #[serde(default)]
    pub log: Option<String>,
}
