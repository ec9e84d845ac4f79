//! Direct HTTP queries against component introspection endpoints.
//!
//! The probe is the test oracle: it reads the ground truth a CLI command is
//! expected to render. It is blocking and never retries. Use
//! [`poll_until`](crate::poll_until) to wait for eventual consistency.

use std::fmt::Display;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ProbeError, ProbeResult};

/// Default request timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking JSON client.
///
/// Must not be used from inside an async runtime.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    /// A probe with [`DEFAULT_PROBE_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the HTTP client cannot be built.
    pub fn new() -> ProbeResult<Self> {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    /// A probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> ProbeResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProbeError::Client)?;
        Ok(Self { client, timeout })
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET http://{addr}/{path}` and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] if the request fails,
    /// [`ProbeError::Status`] on a non-2xx answer and [`ProbeError::Json`]
    /// if the body is not JSON.
    pub fn get_json(&self, addr: impl Display, path: &str) -> ProbeResult<Value> {
        self.get_json_as(addr, path)
    }

    /// Like [`get_json`](Self::get_json), decoding into `T`.
    ///
    /// # Errors
    ///
    /// As [`get_json`](Self::get_json); [`ProbeError::Json`] also covers a
    /// body that does not match `T`.
    pub fn get_json_as<T: DeserializeOwned>(&self, addr: impl Display, path: &str) -> ProbeResult<T> {
        let url = url(&addr, path);
        debug!(url = %url, "probe");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ProbeError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| ProbeError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ProbeError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ProbeError::Json { url, source })
    }
}

/// One-off [`HttpProbe::get_json`] with the default timeout.
///
/// # Errors
///
/// See [`HttpProbe::get_json`].
pub fn get_json(addr: impl Display, path: &str) -> ProbeResult<Value> {
    HttpProbe::new()?.get_json(addr, path)
}

fn url(addr: &impl Display, path: &str) -> String {
    format!("http://{addr}/{}", path.trim_start_matches('/'))
}
