//! Async endpoint surface: one named method per dashboard resource.
//!
//! # Design
//! `Dashboard` pairs the stateless `DashboardClient` with a `Transport`.
//! Each call is a single round trip raced against a cancellation token and
//! bounded by the configured timeout. There are no retries and nothing is
//! cached, so concurrent calls share only the read-only config.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::{into_shape, refresh_data_operation, DashboardClient};
use crate::config::Config;
use crate::endpoint::{self, Endpoint};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};

pub struct Dashboard<T = ReqwestTransport> {
    client: DashboardClient,
    transport: Arc<T>,
    cancel: CancellationToken,
}

impl<T> Clone for Dashboard<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
            cancel: self.cancel.clone(),
        }
    }
}

impl Dashboard<ReqwestTransport> {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: Transport> Dashboard<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            client: DashboardClient::new(config),
            transport: Arc::new(transport),
            cancel: CancellationToken::new(),
        }
    }

    /// Handle sharing this transport whose calls end with
    /// `ApiError::Cancelled` once `token` fires.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self.clone()
        }
    }

    pub fn client(&self) -> &DashboardClient {
        &self.client
    }

    /// Call `endpoint` and return its JSON body verbatim.
    pub async fn call(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        let operation = endpoint.description();
        let request = self.client.build(endpoint);
        let result = match self.round_trip(&operation, request).await {
            Ok(response) => self.client.parse(endpoint, response),
            Err(e) => Err(e),
        };
        logged(result)
    }

    /// Call `endpoint` and decode the body into a declared shape.
    pub async fn call_as<D: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<D, ApiError> {
        let value = self.call(endpoint).await?;
        logged(into_shape(&endpoint.description(), value))
    }

    /// POST to `root_url + suffix`.
    pub async fn refresh_data(&self, suffix: &str) -> Result<Value, ApiError> {
        let operation = refresh_data_operation(suffix);
        let request = self.client.build_refresh_data(suffix);
        let result = match self.round_trip(&operation, request).await {
            Ok(response) => self.client.parse_refresh_data(suffix, response),
            Err(e) => Err(e),
        };
        logged(result)
    }

    async fn round_trip(&self, operation: &str, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "dashboard request");
        let exchange = self.transport.execute(request);
        let timeout = self.client.config().timeout();

        let bounded = async {
            match timeout {
                Some(after) => tokio::time::timeout(after, exchange)
                    .await
                    .map_err(|_| ApiError::Timeout {
                        operation: operation.to_string(),
                        after,
                    }),
                None => Ok(exchange.await),
            }
        };

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ApiError::Cancelled {
                operation: operation.to_string(),
            }),
            outcome = bounded => outcome,
        };

        let response = outcome?.map_err(|source| ApiError::Transport {
            operation: operation.to_string(),
            source,
        })?;
        debug!(status = response.status, "dashboard response");
        Ok(response)
    }
}

fn logged<V>(result: Result<V, ApiError>) -> Result<V, ApiError> {
    if let Err(e) = &result {
        warn!(operation = e.operation(), status = ?e.status(), error = %e, "dashboard call failed");
    }
    result
}

macro_rules! endpoint_methods {
    ($($(#[$doc:meta])* $name:ident => $endpoint:path;)*) => {
        impl<T: Transport> Dashboard<T> {
            $(
                $(#[$doc])*
                pub async fn $name(&self) -> Result<Value, ApiError> {
                    self.call(&$endpoint).await
                }
            )*
        }
    };
}

endpoint_methods! {
    /// `{"status":"ok"}` while the backend is up.
    health => endpoint::HEALTH;
    fetch_rtpi_events => endpoint::RTPI_EVENTS;
    /// Newest tracked application, or `{}` when none is stored.
    fetch_west_lindsey_application => endpoint::WEST_LINDSEY_APPLICATION;
    fetch_west_lindsey_consultations => endpoint::WEST_LINDSEY_CONSULTATIONS;
    fetch_peeringdb_ix_gb => endpoint::PEERINGDB_IX_GB;
    fetch_peeringdb_fac_gb => endpoint::PEERINGDB_FAC_GB;
    fetch_planit_datacentres => endpoint::PLANIT_DATACENTRES;
    fetch_planit_renewables => endpoint::PLANIT_RENEWABLES;
    fetch_planit_renewables_test2 => endpoint::PLANIT_RENEWABLES_TEST2;
    refresh_rtpi => endpoint::REFRESH_RTPI;
    refresh_west_lindsey => endpoint::REFRESH_WEST_LINDSEY;
    refresh_peeringdb_ix => endpoint::REFRESH_PEERINGDB_IX;
    refresh_peeringdb_fac => endpoint::REFRESH_PEERINGDB_FAC;
    refresh_planit_datacentres => endpoint::REFRESH_PLANIT_DATACENTRES;
    refresh_planit_renewables => endpoint::REFRESH_PLANIT_RENEWABLES;
    refresh_planit_renewables_test2 => endpoint::REFRESH_PLANIT_RENEWABLES_TEST2;
}
