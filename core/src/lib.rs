//! API client core for the scraper dashboard backend.
//!
//! # Overview
//! Wraps the backend's fixed REST endpoints: dataset reads (RTPI events,
//! West Lindsey planning records, PeeringDB directories, PlanIt searches) and
//! the POST triggers that ask the backend to re-scrape them.
//!
//! # Design
//! - `Config` resolves the base URL once; it is passed in, never global.
//! - `DashboardClient` is sans-IO: `build` produces an `HttpRequest`,
//!   `parse` consumes an `HttpResponse`. Hosts with their own HTTP stack can
//!   stop here.
//! - `Dashboard` adds the round trip through a `Transport` (reqwest by
//!   default) with a timeout and a cancellation token, and exposes one named
//!   method per endpoint in the `endpoint` table.
//! - Bodies come back as `serde_json::Value`; `types` declares shapes for
//!   callers that want them checked at the boundary.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::Dashboard;
pub use client::DashboardClient;
pub use config::Config;
pub use endpoint::{Endpoint, EndpointKind};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use tokio_util::sync::CancellationToken;
pub use types::{
    Consultation, Facility, Health, InternetExchange, PlanitApplication, PlanningApplication,
    RecordId, RefreshOutcome, RtpiEvent,
};
