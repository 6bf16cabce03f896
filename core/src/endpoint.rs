//! The fixed set of dashboard API endpoints.
//!
//! Each entry pairs a human-readable resource name with a kind and a path
//! relative to the API base URL. The named methods on `Dashboard` are
//! generated from this table.

use crate::http::HttpMethod;

/// Whether an endpoint reads a dataset or asks the backend to rebuild one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Fetch,
    Refresh,
}

impl EndpointKind {
    pub fn method(self) -> HttpMethod {
        match self {
            EndpointKind::Fetch => HttpMethod::Get,
            EndpointKind::Refresh => HttpMethod::Post,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            EndpointKind::Fetch => "fetch",
            EndpointKind::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub resource: &'static str,
    pub kind: EndpointKind,
    pub path: &'static str,
}

impl Endpoint {
    const fn fetch(resource: &'static str, path: &'static str) -> Self {
        Self {
            resource,
            kind: EndpointKind::Fetch,
            path,
        }
    }

    const fn refresh(resource: &'static str, path: &'static str) -> Self {
        Self {
            resource,
            kind: EndpointKind::Refresh,
            path,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.kind.method()
    }

    /// "fetch RTPI events", "refresh PeeringDB facilities (GB)", ...
    pub fn description(&self) -> String {
        format!("{} {}", self.kind.verb(), self.resource)
    }
}

pub const HEALTH: Endpoint = Endpoint::fetch("API health", "/health");

pub const RTPI_EVENTS: Endpoint = Endpoint::fetch("RTPI events", "/rtpi/events");
pub const WEST_LINDSEY_APPLICATION: Endpoint =
    Endpoint::fetch("West Lindsey application", "/west-lindsey/application");
pub const WEST_LINDSEY_CONSULTATIONS: Endpoint =
    Endpoint::fetch("West Lindsey consultations", "/west-lindsey/consultations");
pub const PEERINGDB_IX_GB: Endpoint = Endpoint::fetch("PeeringDB IX (GB)", "/peeringdb/ix/gb");
pub const PEERINGDB_FAC_GB: Endpoint =
    Endpoint::fetch("PeeringDB facilities (GB)", "/peeringdb/fac/gb");
pub const PLANIT_DATACENTRES: Endpoint =
    Endpoint::fetch("PlanIt data centres", "/planit/datacentres");
pub const PLANIT_RENEWABLES: Endpoint = Endpoint::fetch("PlanIt renewables", "/planit/renewables");
pub const PLANIT_RENEWABLES_TEST2: Endpoint =
    Endpoint::fetch("PlanIt renewables (test2)", "/planit/renewables-test2");

pub const REFRESH_RTPI: Endpoint = Endpoint::refresh("RTPI events", "/refresh/rtpi");
pub const REFRESH_WEST_LINDSEY: Endpoint =
    Endpoint::refresh("West Lindsey consultations", "/refresh/west-lindsey");
pub const REFRESH_PEERINGDB_IX: Endpoint =
    Endpoint::refresh("PeeringDB IX (GB)", "/refresh/peeringdb-ix");
pub const REFRESH_PEERINGDB_FAC: Endpoint =
    Endpoint::refresh("PeeringDB facilities (GB)", "/refresh/peeringdb-fac");
pub const REFRESH_PLANIT_DATACENTRES: Endpoint =
    Endpoint::refresh("PlanIt data centres", "/refresh/planit-dc");
pub const REFRESH_PLANIT_RENEWABLES: Endpoint =
    Endpoint::refresh("PlanIt renewables", "/refresh/planit-renew");
pub const REFRESH_PLANIT_RENEWABLES_TEST2: Endpoint =
    Endpoint::refresh("PlanIt renewables (test2)", "/refresh/planit-test2");

/// Every endpoint the dashboard API exposes.
pub const ALL: &[Endpoint] = &[
    HEALTH,
    RTPI_EVENTS,
    WEST_LINDSEY_APPLICATION,
    WEST_LINDSEY_CONSULTATIONS,
    PEERINGDB_IX_GB,
    PEERINGDB_FAC_GB,
    PLANIT_DATACENTRES,
    PLANIT_RENEWABLES,
    PLANIT_RENEWABLES_TEST2,
    REFRESH_RTPI,
    REFRESH_WEST_LINDSEY,
    REFRESH_PEERINGDB_IX,
    REFRESH_PEERINGDB_FAC,
    REFRESH_PLANIT_DATACENTRES,
    REFRESH_PLANIT_RENEWABLES,
    REFRESH_PLANIT_RENEWABLES_TEST2,
];

/// Look an endpoint up by kind and path.
pub fn find(kind: EndpointKind, path: &str) -> Option<&'static Endpoint> {
    ALL.iter().find(|e| e.kind == kind && e.path == path)
}
