//! Stateless HTTP request builder and response parser for the dashboard API.
//!
//! # Design
//! `DashboardClient` holds only a resolved `Config` and carries no mutable
//! state between calls. Every endpoint goes through one `build` and one
//! `parse`; the caller (or `Dashboard`) executes the HTTP round trip in
//! between, keeping this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::config::Config;
use crate::endpoint::{Endpoint, EndpointKind};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Synchronous, stateless client for the dashboard API.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    config: Config,
}

impl DashboardClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Request for `endpoint`, relative to the API base URL.
    pub fn build(&self, endpoint: &Endpoint) -> HttpRequest {
        let base = self.config.base_url().trim_end_matches('/');
        request(endpoint.method(), format!("{base}{}", endpoint.path))
    }

    /// POST to `root_url + suffix`. The suffix is taken as given, so it
    /// usually starts with `/api/refresh/`.
    pub fn build_refresh_data(&self, suffix: &str) -> HttpRequest {
        request(HttpMethod::Post, format!("{}{suffix}", self.config.root_url()))
    }

    /// Check the status and return the body as untouched JSON.
    pub fn parse(&self, endpoint: &Endpoint, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(endpoint.kind, &endpoint.description(), response)
    }

    /// Check the status and decode the body into a declared shape.
    pub fn parse_as<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        let operation = endpoint.description();
        let value = parse_json(endpoint.kind, &operation, response)?;
        into_shape(&operation, value)
    }

    pub fn parse_refresh_data(&self, suffix: &str, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(EndpointKind::Refresh, &refresh_data_operation(suffix), response)
    }
}

/// Operation label used for errors from `refresh_data`.
pub(crate) fn refresh_data_operation(suffix: &str) -> String {
    format!("refresh {suffix}")
}

fn request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![("accept".to_string(), "application/json".to_string())],
        body: None,
    }
}

fn parse_json(kind: EndpointKind, operation: &str, response: HttpResponse) -> Result<Value, ApiError> {
    check_status(kind, operation, &response)?;
    serde_json::from_str(&response.body).map_err(|e| {
        let content_type = response.header("content-type").map(str::to_string);
        warn!(operation, content_type = ?content_type, error = %e, "response body is not JSON");
        ApiError::Decode {
            operation: operation.to_string(),
            content_type,
            message: e.to_string(),
        }
    })
}

pub(crate) fn into_shape<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Shape {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(kind: EndpointKind, operation: &str, response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let operation = operation.to_string();
    match (response.status, kind) {
        (404, _) => Err(ApiError::NotFound { operation }),
        (409, EndpointKind::Refresh) => Err(ApiError::RefreshInProgress { operation }),
        (status, _) => Err(ApiError::Status {
            operation,
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint;
    use crate::types::{RefreshOutcome, RtpiEvent};

    fn client() -> DashboardClient {
        DashboardClient::new(Config::resolve(Some("http://localhost:8000/api")))
    }

    #[test]
    fn build_fetch_produces_get() {
        let req = client().build(&endpoint::RTPI_EVENTS);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/api/rtpi/events");
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_refresh_produces_bodyless_post() {
        let req = client().build(&endpoint::REFRESH_PLANIT_DATACENTRES);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8000/api/refresh/planit-dc");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_refresh_data_uses_root_url() {
        let req = client().build_refresh_data("/refresh/rtpi");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8000/refresh/rtpi");
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let client = DashboardClient::new(Config::resolve(Some("http://localhost:8000/api/")));
        let req = client.build(&endpoint::PEERINGDB_FAC_GB);
        assert_eq!(req.url, "http://localhost:8000/api/peeringdb/fac/gb");
    }

    #[test]
    fn parse_returns_body_verbatim() {
        let body = r#"{"events":[{"id":1}]}"#;
        let value = client()
            .parse(&endpoint::RTPI_EVENTS, HttpResponse::new(200, body))
            .unwrap();
        assert_eq!(value, serde_json::json!({"events": [{"id": 1}]}));
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let value = client()
            .parse(&endpoint::REFRESH_RTPI, HttpResponse::new(202, r#"{"ok":true}"#))
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn parse_server_error_names_resource() {
        let err = client()
            .parse(&endpoint::PEERINGDB_IX_GB, HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert!(err.to_string().contains("PeeringDB IX"), "{err}");
        assert!(err.to_string().contains("internal error"), "{err}");
    }

    #[test]
    fn parse_not_found() {
        let err = client()
            .parse(&endpoint::PLANIT_RENEWABLES_TEST2, HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert!(err.to_string().contains("PlanIt renewables (test2)"));
    }

    #[test]
    fn conflict_on_refresh_is_in_progress() {
        let err = client()
            .parse(
                &endpoint::REFRESH_WEST_LINDSEY,
                HttpResponse::new(409, r#"{"ok":false,"error":"already_running"}"#),
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::RefreshInProgress { .. }));
    }

    #[test]
    fn conflict_on_fetch_is_plain_status() {
        let err = client()
            .parse(&endpoint::RTPI_EVENTS, HttpResponse::new(409, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 409, .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = client()
            .parse(&endpoint::WEST_LINDSEY_CONSULTATIONS, HttpResponse::new(200, "<html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { content_type: None, .. }));
        assert!(err.to_string().contains("West Lindsey consultations"));
    }

    #[test]
    fn bad_json_keeps_content_type() {
        let mut response = HttpResponse::new(200, "<html><body>Bad Gateway</body></html>");
        response.headers.push(("Content-Type".to_string(), "text/html; charset=utf-8".to_string()));
        let err = client().parse(&endpoint::RTPI_EVENTS, response).unwrap_err();
        match err {
            ApiError::Decode { content_type, .. } => {
                assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_as_decodes_declared_shape() {
        let events: Vec<RtpiEvent> = client()
            .parse_as(
                &endpoint::RTPI_EVENTS,
                HttpResponse::new(200, r#"[{"id":"e1","title":"Planning Summit"}]"#),
            )
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Planning Summit");
    }

    #[test]
    fn parse_as_shape_mismatch_is_distinguishable() {
        let err = client()
            .parse_as::<RefreshOutcome>(&endpoint::REFRESH_RTPI, HttpResponse::new(200, "[1,2]"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Shape { .. }));
    }

    #[test]
    fn parse_refresh_data_names_suffix() {
        let err = client()
            .parse_refresh_data("/api/refresh/planit-dc", HttpResponse::new(500, ""))
            .unwrap_err();
        assert!(err.to_string().contains("/api/refresh/planit-dc"));
    }
}
