//! Base URL resolution for the dashboard API.
//!
//! # Design
//! A `Config` is resolved once at startup and handed to a client by value.
//! Nothing here reads the environment after construction, so tests can build
//! as many configurations side by side as they need.

use std::num::ParseIntError;
use std::time::Duration;

use tracing::warn;
use url::{Position, Url};

/// Base URL used when no override is supplied.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// [`DEFAULT_BASE_URL`] without its `/api` segment.
pub const DEFAULT_ROOT_URL: &str = "http://127.0.0.1:8000";

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Environment variable holding the per-call timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "API_TIMEOUT_SECS";

/// Per-call budget. Sits above the backend's 45s cap on a refresh run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const API_SEGMENT: &str = "/api";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    root_url: String,
    timeout: Option<Duration>,
}

impl Config {
    /// Resolve from an optional override. Never fails: an absent, blank or
    /// malformed override selects [`DEFAULT_BASE_URL`].
    ///
    /// Surrounding whitespace is trimmed from the override; otherwise a valid
    /// override becomes `base_url` exactly as given.
    pub fn resolve(override_url: Option<&str>) -> Self {
        let (base_url, root_url) = match override_url.map(str::trim) {
            None | Some("") => (DEFAULT_BASE_URL.to_string(), DEFAULT_ROOT_URL.to_string()),
            Some(candidate) => match Url::parse(candidate) {
                Ok(url) if url.has_host() => (candidate.to_string(), root_of(&url)),
                Ok(_) => {
                    warn!(value = candidate, "base URL override has no host, using default");
                    (DEFAULT_BASE_URL.to_string(), DEFAULT_ROOT_URL.to_string())
                }
                Err(e) => {
                    warn!(value = candidate, error = %e, "invalid base URL override, using default");
                    (DEFAULT_BASE_URL.to_string(), DEFAULT_ROOT_URL.to_string())
                }
            },
        };

        Self {
            base_url,
            root_url,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Resolve from [`BASE_URL_ENV`] and [`TIMEOUT_ENV`]. A malformed
    /// timeout is logged and the default kept.
    pub fn from_env() -> Self {
        let override_url = std::env::var(BASE_URL_ENV).ok();
        let config = Self::resolve(override_url.as_deref());

        match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => match parse_timeout(&raw) {
                Ok(timeout) => config.with_timeout(timeout),
                Err(e) => {
                    warn!(env = TIMEOUT_ENV, value = %raw, error = %e, "ignoring malformed timeout");
                    config
                }
            },
            Err(_) => config,
        }
    }

    /// Replace the per-call timeout. `None` disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// API-scoped base URL, e.g. `http://127.0.0.1:8000/api`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Same host without the trailing `/api` segment.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None)
    }
}

/// Whole seconds; `0` disables the timeout.
pub fn parse_timeout(raw: &str) -> Result<Option<Duration>, ParseIntError> {
    match raw.trim().parse::<u64>()? {
        0 => Ok(None),
        secs => Ok(Some(Duration::from_secs(secs))),
    }
}

/// Scheme and authority of `url`, plus its path minus a final `api` segment.
fn root_of(url: &Url) -> String {
    let path = url.path().trim_end_matches('/');
    let path = path.strip_suffix(API_SEGMENT).unwrap_or(path);
    format!("{}{path}", &url[..Position::BeforePath])
}
